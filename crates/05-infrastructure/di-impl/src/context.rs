//! 应用上下文
//!
//! [`BeanRegistry`] 的具体实现。每个键对应一个 `OnceCell` 槽位，
//! 槽位从 `DashMap` 取出后立即释放分片锁再构造实例：
//! 同一键的并发首次注册只有一个构造函数被执行，其余调用者阻塞等待并拿到同一实例；
//! 构造函数内部注册其他键不会与外层调用互相阻塞。

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use di_abstractions::{
    Bean, BeanRegistry, BeanResolver, CompositeKey, Injectable, InjectionSite, KeyArgs,
    KeyBuilder, KeyPart,
};
use infrastructure_common::{
    get_global_component_registry, Component, ContainerConfig, DependencyError,
    DependencyResult, NamingConventions, TypeInfo,
};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::Serialize;
use std::any::TypeId;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 已构造的实例记录
#[derive(Clone)]
struct BeanRecord {
    bean: Bean,
    created_at: DateTime<Utc>,
}

/// 注册表槽位，构造失败时保持为空
#[derive(Default)]
struct BeanSlot {
    cell: OnceCell<BeanRecord>,
}

impl BeanSlot {
    fn filled(record: BeanRecord) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(record);
        Self { cell }
    }
}

/// 应用上下文
///
/// 进程级（或无服务器温容器级）的组件注册表，同时记录
/// 类级访问器绑定与注入点。
pub struct ApplicationContext {
    /// 上下文标识
    id: Uuid,
    /// 创建时间
    created_at: DateTime<Utc>,
    /// 容器配置
    config: ContainerConfig,
    /// 复合键到实例槽位
    beans: DashMap<CompositeKey, Arc<BeanSlot>>,
    /// 类级访问器当前绑定的键
    instance_bindings: DashMap<TypeId, CompositeKey>,
    /// 已解析的注入点
    injection_sites: RwLock<Vec<InjectionSite>>,
}

impl ApplicationContext {
    /// 创建新的上下文
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// 使用指定配置创建上下文
    pub fn with_config(config: ContainerConfig) -> Self {
        let context = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            config,
            beans: DashMap::new(),
            instance_bindings: DashMap::new(),
            injection_sites: RwLock::new(Vec::new()),
        };
        debug!("创建应用上下文: {}", context.id);
        context
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 注册组件（register 装饰器的运行时形式）
    ///
    /// 键由类型与装饰参数构成；键已存在时返回已有实例，`constructor` 不会被调用。
    pub fn register_component<T, F, E>(&self, args: &[KeyPart], constructor: F) -> Result<Arc<T>, E>
    where
        T: Component,
        F: FnOnce() -> Result<T, E>,
        E: From<DependencyError>,
    {
        self.ensure_eligible::<T>()?;
        let key = KeyBuilder::component_key::<T>(args);
        self.register_as(key, constructor)
    }

    /// 注入组件（inject 装饰器的运行时形式）
    ///
    /// 先按键解析，找不到时经注册路径构造。解析结果同时绑定到
    /// `T` 的类级访问器并记录到宿主的 `attribute` 注入点。
    pub fn inject<H, T>(&self, attribute: Option<&str>, values: &[KeyPart]) -> DependencyResult<Arc<T>>
    where
        H: ?Sized + 'static,
        T: Injectable,
    {
        self.ensure_eligible::<T>()?;
        let key = KeyBuilder::component_key::<T>(values);

        let bean = match self.resolve_as::<T>(&key) {
            Ok(bean) => bean,
            Err(e) if e.is_not_found() => {
                debug!("注入时未找到实例，开始构造: {}", key);
                self.register_as(key.clone(), || {
                    T::from_args(KeyArgs::for_component::<T>(values))
                })?
            }
            Err(e) => return Err(e),
        };

        self.instance_bindings.insert(TypeId::of::<T>(), key.clone());

        let type_info = TypeInfo::of::<T>();
        let attribute = attribute
            .map(str::to_string)
            .unwrap_or_else(|| NamingConventions::injection_attribute_name(&type_info));
        self.record_site(InjectionSite::new(TypeInfo::of::<H>(), attribute, key));

        Ok(bean)
    }

    /// 类级访问器的当前实例
    ///
    /// 跟随最近一次注入所用的键；尚未注入过时使用无参数的默认键。
    pub fn instance<T: Component>(&self) -> DependencyResult<Arc<T>> {
        let key = self
            .instance_bindings
            .get(&TypeId::of::<T>())
            .map(|binding| binding.value().clone())
            .unwrap_or_else(|| KeyBuilder::component_key::<T>(&[]));

        self.resolve_as::<T>(&key)
    }

    /// 已记录的注入点
    pub fn injection_sites(&self) -> Vec<InjectionSite> {
        self.injection_sites.read().clone()
    }

    /// 诊断快照
    pub fn snapshot(&self) -> ContextSnapshot {
        let mut beans: Vec<BeanSnapshot> = self
            .beans
            .iter()
            .filter_map(|entry| {
                entry.value().cell.get().map(|record| BeanSnapshot {
                    key: entry.key().clone(),
                    created_at: record.created_at,
                })
            })
            .collect();
        beans.sort_by_key(|bean| bean.created_at);

        let injection_sites = self
            .injection_sites
            .read()
            .iter()
            .map(|site| SiteSnapshot {
                host: site.host.module_path.clone(),
                attribute: site.attribute.clone(),
                key: site.key.clone(),
            })
            .collect();

        ContextSnapshot {
            id: self.id,
            created_at: self.created_at,
            beans,
            injection_sites,
        }
    }

    fn ensure_eligible<T: Component>(&self) -> DependencyResult<()> {
        if self.config.require_declared_components
            && !get_global_component_registry().is_declared(TypeId::of::<T>())
        {
            warn!("拒绝未声明的组件: {}", std::any::type_name::<T>());
            return Err(DependencyError::configuration(
                std::any::type_name::<T>(),
                "组件未通过组件宏声明",
            ));
        }
        Ok(())
    }

    fn record_site(&self, site: InjectionSite) {
        let mut sites = self.injection_sites.write();
        match sites.iter_mut().find(|existing| existing.same_slot(&site)) {
            Some(existing) => *existing = site,
            None => {
                debug!("记录注入点: {}", site);
                sites.push(site);
            }
        }
    }
}

impl Default for ApplicationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("beans", &self.len())
            .finish()
    }
}

impl BeanRegistry for ApplicationContext {
    fn register<F, E>(&self, key: CompositeKey, factory: F) -> Result<Bean, E>
    where
        F: FnOnce() -> Result<Bean, E>,
    {
        let slot = self.beans.entry(key.clone()).or_default().value().clone();

        let mut constructed = false;
        let result = slot.cell.get_or_try_init(|| {
            constructed = true;
            factory().map(|bean| BeanRecord {
                bean,
                created_at: Utc::now(),
            })
        });

        match result {
            Ok(record) => {
                if constructed {
                    // 等待期间槽位可能已被失败的构造者移除
                    self.beans.entry(key.clone()).or_insert_with(|| slot.clone());
                    info!("创建组件实例: {}", key);
                } else {
                    debug!("复用已注册的组件实例: {}", key);
                }
                Ok(record.bean.clone())
            }
            Err(e) => {
                self.beans.remove_if(&key, |_, current| {
                    Arc::ptr_eq(current, &slot) && current.cell.get().is_none()
                });
                warn!("组件创建失败，键保持未注册: {}", key);
                Err(e)
            }
        }
    }

    fn resolve(&self, key: &CompositeKey) -> DependencyResult<Bean> {
        self.beans
            .get(key)
            .and_then(|slot| slot.cell.get().map(|record| record.bean.clone()))
            .ok_or_else(|| DependencyError::not_found(key))
    }

    fn replace(&self, key: CompositeKey, bean: Bean) -> Option<Bean> {
        info!("显式替换组件实例: {}", key);
        let record = BeanRecord {
            bean,
            created_at: Utc::now(),
        };
        self.beans
            .insert(key, Arc::new(BeanSlot::filled(record)))
            .and_then(|previous| previous.cell.get().map(|record| record.bean.clone()))
    }

    fn contains(&self, key: &CompositeKey) -> bool {
        self.beans
            .get(key)
            .map_or(false, |slot| slot.cell.get().is_some())
    }

    fn keys(&self) -> Vec<CompositeKey> {
        self.beans
            .iter()
            .filter(|entry| entry.value().cell.get().is_some())
            .map(|entry| entry.key().clone())
            .collect()
    }

    fn all(&self) -> Vec<Bean> {
        self.beans
            .iter()
            .filter_map(|entry| entry.value().cell.get().map(|record| record.bean.clone()))
            .collect()
    }

    fn clear(&self) {
        info!("清空应用上下文: {}", self.id);
        self.beans.clear();
        self.instance_bindings.clear();
        self.injection_sites.write().clear();
    }
}

/// 上下文诊断快照
#[derive(Debug, Clone, Serialize)]
pub struct ContextSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub beans: Vec<BeanSnapshot>,
    pub injection_sites: Vec<SiteSnapshot>,
}

impl ContextSnapshot {
    /// 序列化为 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BeanSnapshot {
    pub key: CompositeKey,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteSnapshot {
    pub host: String,
    pub attribute: String,
    pub key: CompositeKey,
}
