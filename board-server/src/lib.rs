//! Comanda Board Server
//!
//! HTTP gateway in front of a restaurant POS terminal: caches table
//! snapshots, consolidates raw order lines into a comanda and renders a
//! localized customer-facing message through a text-generation backend.
//!
//! # Module structure
//!
//! ```text
//! board-server/src/
//! ├── core/       # 配置、状态、服务器装配 (config, state, server assembly)
//! ├── api/        # HTTP 路由和处理器 (routes and handlers)
//! ├── cache/      # table snapshot cache
//! ├── pipeline/   # order consolidation pipeline
//! ├── clients/    # POS client (mock + HTTP) and token manager
//! ├── services/   # chat completion backend
//! └── utils/      # errors, results, logging
//! ```

pub mod api;
pub mod cache;
pub mod clients;
pub mod core;
pub mod pipeline;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use cache::TableCache;
pub use clients::{PosClient, TokenManager};
pub use core::{Config, Server, ServerState};
pub use pipeline::OrderPipeline;
pub use services::ChatBackend;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
