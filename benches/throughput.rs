use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use marketplace_cart::stores::MemoryStorage;
use marketplace_cart::{CartConfig, CartProvider, NewLineItem, PersistMode};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

const PRODUCTS: usize = 100;
const OPERATIONS: usize = 10_000;

fn product(n: usize) -> NewLineItem {
    NewLineItem {
        id: format!("product-{}", n),
        title: format!("Product {}", n),
        image_url: format!("https://img/{}.png", n),
        price: Decimal::new(n as i64 * 125, 2),
    }
}

/// Adds every product, then cycles increment/decrement across them.
async fn churn(mode: PersistMode) {
    let provider = CartProvider::mounted(
        Arc::new(MemoryStorage::new()),
        &CartConfig::new("Bench", mode),
    );
    let cart = provider.use_cart().unwrap();
    for n in 0..PRODUCTS {
        cart.add_to_cart(product(n));
    }
    for i in 0..OPERATIONS - PRODUCTS {
        let id = format!("product-{}", i % PRODUCTS);
        if i % 3 == 2 {
            cart.decrement(&id);
        } else {
            cart.increment(&id);
        }
    }
    cart.settle().await;
}

fn cart_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    group.throughput(Throughput::Elements(OPERATIONS as u64));
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(50);

    group.bench_function("lagged_10K_operations_100_products", |b| {
        let rt = Runtime::new().unwrap();
        b.to_async(rt).iter(|| churn(PersistMode::Lagged));
    });

    group.bench_function("current_10K_operations_100_products", |b| {
        let rt = Runtime::new().unwrap();
        b.to_async(rt).iter(|| churn(PersistMode::Current));
    });

    group.finish();
}

criterion_group!(benches, cart_operations);
criterion_main!(benches);
