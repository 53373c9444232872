//! cfg 模块 - 配置管理
//!
//! 通过 TypeOptions 按名称创建已注册的实现

#[macro_use]
mod macros;
pub mod registry;
pub mod type_options;

pub use registry::{create_trait_from_type_options, register_trait};
pub use type_options::TypeOptions;
