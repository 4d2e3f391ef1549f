// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;

use crate::domain::services::tuning_service::MissionUpdate;

/// 调优写入请求
///
/// 越界或畸形字段在服务层被钳制/归一化，而不是拒绝
#[derive(Debug, Deserialize)]
pub struct ApplyTuningRequestDto {
    pub updates: MissionUpdate,
}
