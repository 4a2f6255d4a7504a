//! 注入点声明与预先装配
//!
//! `#[inject]` 宏在程序启动时登记注入点，启动器据此在处理请求前
//! 解析全部注入点，任何一个失败都会中止启动。

use infrastructure_common::DependencyResult;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{error, info};

/// 注入点声明
#[derive(Debug, Clone, Copy)]
pub struct SiteDeclaration {
    /// 宿主类型名
    pub host: &'static str,
    /// 注入点名称
    pub attribute: &'static str,
    /// 解析该注入点
    pub wire: fn() -> DependencyResult<()>,
}

static DECLARED_SITES: Lazy<Mutex<Vec<SiteDeclaration>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// 登记注入点
pub fn declare_injection_site(declaration: SiteDeclaration) {
    let mut sites = DECLARED_SITES.lock();
    if !sites
        .iter()
        .any(|site| site.host == declaration.host && site.attribute == declaration.attribute)
    {
        sites.push(declaration);
    }
}

/// 已登记的注入点
pub fn declared_injection_sites() -> Vec<SiteDeclaration> {
    DECLARED_SITES.lock().clone()
}

/// 解析所有已登记的注入点，返回解析数量
pub fn wire_declared_sites() -> DependencyResult<usize> {
    // 先复制再执行，避免构造过程中登记新注入点时重入锁
    let sites = declared_injection_sites();

    for site in &sites {
        (site.wire)().map_err(|e| {
            error!("注入点装配失败: {}.{}: {}", site.host, site.attribute, e);
            e
        })?;
    }

    info!("已装配 {} 个注入点", sites.len());
    Ok(sites.len())
}
