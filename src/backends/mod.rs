// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for frame capture
//!
//! - [`camera`]: capture devices driven through GStreamer

pub mod camera;
