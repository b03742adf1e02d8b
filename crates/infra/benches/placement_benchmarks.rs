use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use storefront_auth::Actor;
use storefront_core::{AggregateId, ExpectedVersion, Money, UserId};
use storefront_infra::{InMemoryOrderRepository, OrderRepository, PlacementEngine};
use storefront_orders::{DiscountPolicy, Order, OrderId, OrderItem, ProductId};

fn seeded_engine(
    item_count: usize,
) -> (PlacementEngine<InMemoryOrderRepository>, OrderId, Actor) {
    let customer_id = UserId::new();
    let mut order = Order::draft(OrderId::new(AggregateId::new()), customer_id, true);

    for _ in 0..item_count {
        let item = OrderItem::new(
            ProductId::new(AggregateId::new()),
            Money::parse("19.99").unwrap(),
            3,
        )
        .unwrap();
        order.add_item(item).unwrap();
    }

    let repository = InMemoryOrderRepository::new();
    repository.save(&order, ExpectedVersion::Any).unwrap();

    let engine = PlacementEngine::new(repository, DiscountPolicy::standard());
    (engine, order.id_typed(), Actor::customer(customer_id))
}

fn bench_place_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_order");

    for item_count in [1usize, 10, 100] {
        group.throughput(Throughput::Elements(item_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(item_count),
            &item_count,
            |b, &item_count| {
                b.iter_batched(
                    || seeded_engine(item_count),
                    |(engine, order_id, actor)| {
                        black_box(engine.place_order(order_id, &actor)).unwrap()
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_place_order);
criterion_main!(benches);
