// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the notes application.

pub mod dialogs;
pub mod notes_panel;
pub mod timeline;
