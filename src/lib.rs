//! Autograd - 作业提交平台后端服务
//!
//! 基于 Actix Web 构建的作业提交与分页查询服务。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义（含分页游标）
//! - `routes`: API 路由层（请求绑定、转换、响应）
//! - `runtime`: 运行时生命周期管理
//! - `services`: 用例层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
