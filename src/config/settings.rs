// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含数据库、服务器、外部供应商和流水线工作器等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 外部供应商配置
    pub providers: ProviderSettings,
    /// 流水线工作器配置
    pub worker: WorkerSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 外部供应商配置设置
#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    /// 线索搜索供应商
    pub lead_search: ProviderEndpointSettings,
    /// 线索丰富化供应商
    pub enrichment: ProviderEndpointSettings,
}

/// 单个供应商端点配置
#[derive(Debug, Deserialize)]
pub struct ProviderEndpointSettings {
    /// 服务基础URL
    pub base_url: String,
    /// API密钥
    pub api_key: Option<String>,
}

/// 流水线工作器配置设置
#[derive(Debug, Deserialize)]
pub struct WorkerSettings {
    /// 是否启动后台轮询
    pub enabled: bool,
    /// 每次调用处理的最大待处理单元数
    pub batch_size: u64,
    /// 后台轮询间隔（秒）
    pub poll_interval_secs: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB pool settings
            .set_default("database.max_connections", 100)?
            .set_default("database.min_connections", 10)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default provider settings
            .set_default("providers.lead_search.base_url", "http://localhost:9100")?
            .set_default("providers.enrichment.base_url", "http://localhost:9200")?
            // Default worker settings
            .set_default("worker.enabled", true)?
            .set_default("worker.batch_size", 5)?
            .set_default("worker.poll_interval_secs", 60)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PROSPECTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
