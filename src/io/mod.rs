// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: persisted notebook state and note export/import.

pub mod serialization;
pub mod storage;
