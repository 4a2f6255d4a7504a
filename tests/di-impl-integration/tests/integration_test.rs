//! di-impl 并发集成测试

use di_abstractions::{BeanRegistry, BeanResolver, KeyBuilder};
use di_impl::ApplicationContext;
use infrastructure_common::{Component, DependencyError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 测试组件
#[derive(Debug)]
struct SessionStore {
    shard: i64,
}

impl Component for SessionStore {
    fn name(&self) -> &'static str {
        "SessionStore"
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_registration_constructs_once() {
    let context = Arc::new(ApplicationContext::new());
    let constructions = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let context = context.clone();
            let constructions = constructions.clone();
            tokio::task::spawn_blocking(move || {
                context.register_component::<SessionStore, _, DependencyError>(&[7.into()], || {
                    constructions.fetch_add(1, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(20));
                    Ok(SessionStore { shard: 7 })
                })
            })
        })
        .collect();

    let mut stores = Vec::new();
    for handle in handles {
        stores.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(constructions.load(Ordering::SeqCst), 1);
    assert!(stores.iter().all(|store| Arc::ptr_eq(store, &stores[0])));
    assert_eq!(stores[0].shard, 7);
    assert_eq!(context.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_distinct_keys_do_not_block_each_other() {
    let context = Arc::new(ApplicationContext::new());

    let handles: Vec<_> = (0..8_i64)
        .map(|shard| {
            let context = context.clone();
            tokio::task::spawn_blocking(move || {
                context.register_component::<SessionStore, _, DependencyError>(&[shard.into()], || {
                    Ok(SessionStore { shard })
                })
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(context.len(), 8);
    let key = KeyBuilder::component_key::<SessionStore>(&[3.into()]);
    let store = context.resolve_as::<SessionStore>(&key).unwrap();
    assert_eq!(store.shard, 3);
}

#[tokio::test]
async fn test_failed_factory_surfaces_original_error() {
    let context = ApplicationContext::new();
    let key = KeyBuilder::new().push("reports").build();

    let err = context
        .register_as::<SessionStore, _, anyhow::Error>(key.clone(), || {
            Err(anyhow::anyhow!("连接超时"))
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "连接超时");
    assert!(context.resolve(&key).unwrap_err().is_not_found());
}
