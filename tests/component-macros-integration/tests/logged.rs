//! #[logged] 调用日志

use component_macros::logged;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

#[derive(Debug)]
struct OrderController {
    region: &'static str,
}

impl OrderController {
    #[logged]
    fn place(order_id: u64, region: &str) -> String {
        format!("{}-{}", region, order_id)
    }

    #[logged]
    fn cancel(&self, order_id: u64) -> bool {
        self.region == "eu" && order_id > 0
    }
}

#[logged]
fn price((net, tax): (u32, u32), discount: Option<u32>) -> u32 {
    net + tax - discount.unwrap_or(0)
}

#[test]
fn test_logged_function_records_name_and_arguments() {
    let (placed, logs) = capture(|| OrderController::place(7, "eu"));

    assert_eq!(placed, "eu-7");
    assert!(logs.contains("INFO"));
    assert!(logs.contains("[logged] 调用函数 place，参数: [order_id=7, region=\"eu\"]"));
}

#[test]
fn test_logged_method_skips_receiver() {
    let controller = OrderController { region: "eu" };
    let (cancelled, logs) = capture(|| controller.cancel(3));

    assert!(cancelled);
    assert!(logs.contains("调用函数 cancel，参数: [order_id=3]"));
}

#[test]
fn test_logged_logs_every_call() {
    let (total, logs) = capture(|| price((100, 20), Some(5)) + price((10, 2), None));

    assert_eq!(total, 127);
    assert_eq!(logs.matches("调用函数 price").count(), 2);
    assert!(logs.contains("参数: [discount=Some(5)]"));
    assert!(logs.contains("参数: [discount=None]"));
}
