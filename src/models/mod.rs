// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: notes, the notebook that owns them, and playback state.

pub mod history;
pub mod note;
pub mod notebook;
pub mod playback;
