//! # Component Macros
//!
//! 这个 crate 提供组件声明与依赖注入的过程宏，展开后的代码调用 `di_impl`，
//! 并通过 `ctor` 在程序启动时完成登记，使用方需同时依赖这两个 crate。
//!
//! ## 核心宏
//!
//! - [`component`] / [`Component`](derive@Component) - 实现 `Component` 并登记到全局组件目录
//! - [`register`] - 把关联构造函数改写为按复合键注册的单例构造
//! - [`inject`] - 为宿主类型生成注入点访问器
//! - [`logged`] - 每次调用时记录函数名与参数
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{component, inject, register};
//!
//! #[component]
//! #[derive(Debug)]
//! pub struct MySqlRepository {
//!     table: String,
//! }
//!
//! impl MySqlRepository {
//!     #[register("users")]
//!     pub fn users() -> Self {
//!         Self { table: "users".into() }
//!     }
//! }
//!
//! #[inject(CacheService)]
//! pub struct OrderController;
//!
//! let cache = OrderController::cache_service()?;
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod inject;
mod logged;
mod register;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 组件声明宏
///
/// 为结构体实现 `Component` trait，并在程序启动时登记到全局组件目录。
///
/// # 参数
///
/// - `name = "custom_name"` - 自定义组件名称（默认为类型名）
/// - `description = "..."` - 组件说明
///
/// # 示例
///
/// ```rust,ignore
/// #[component(name = "cache")]
/// #[derive(Debug)]
/// pub struct CacheService {
///     // 字段
/// }
/// ```
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    component::component_impl(args, input)
}

/// 组件派生宏
///
/// 与 [`component`] 等价，参数写在 `#[component(...)]` 辅助属性中。
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Debug, Component)]
/// #[component(description = "颜色仓储")]
/// pub struct ColorRepository {
///     // 字段
/// }
/// ```
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(input)
}

/// 注册宏
///
/// 作用于返回 `Self` 或 `Result<Self, E>` 的关联构造函数。宏参数为复合键参数
/// （字符串、整数、浮点字面量或可转换为 `KeyPart` 的表达式），
/// 同一键只执行一次原构造函数，返回值改为 `Arc<Self>`：
///
/// - `-> Self` 变为 `-> Result<Arc<Self>, DependencyError>`
/// - `-> Result<Self, E>` 变为 `-> Result<Arc<Self>, E>`，要求 `E: From<DependencyError>`
///
/// # 示例
///
/// ```rust,ignore
/// impl MySqlRepository {
///     #[register("orders")]
///     pub fn orders(pool_size: usize) -> Self {
///         Self::with_table("orders", pool_size)
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn register(args: TokenStream, input: TokenStream) -> TokenStream {
    register::register_impl(args, input)
}

/// 注入宏
///
/// 作用于宿主结构体。第一个参数为被注入的组件类型，其后为构造参数，
/// 可用 `name = "..."` 指定注入点名称（默认为组件类型名的蛇形形式）。
/// 生成的关联函数先按键解析，找不到时调用 `Injectable::from_args` 构造。
///
/// # 示例
///
/// ```rust,ignore
/// #[inject(CacheService)]
/// #[inject(MySqlRepository, "users", name = "users")]
/// pub struct UserController;
///
/// let cache = UserController::cache_service()?;
/// let users = UserController::users()?;
/// ```
#[proc_macro_attribute]
pub fn inject(args: TokenStream, input: TokenStream) -> TokenStream {
    inject::inject_impl(args, input)
}

/// 调用日志宏
///
/// 作用于函数或方法，每次调用先以 info 级别记录模块路径、函数名与参数，
/// 再执行原函数体。被记录的参数需实现 `Debug`，`self` 接收者与解构模式不记录。
///
/// # 示例
///
/// ```rust,ignore
/// impl OrderController {
///     #[logged]
///     pub fn place(order_id: u64, region: &str) -> DependencyResult<()> {
///         // 日志: [app::orders] 调用函数 place，参数: [order_id=7, region="eu"]
///         Ok(())
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn logged(args: TokenStream, input: TokenStream) -> TokenStream {
    logged::logged_impl(args, input)
}
