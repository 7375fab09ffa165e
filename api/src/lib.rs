// API 库入口
// 导出路由和配置 供 main 和集成测试使用

pub mod admin_handlers;
pub mod api_types;
pub mod config;
pub mod consts;
pub mod db;
pub mod handlers;
pub mod init;
pub mod server;
