use criterion::{criterion_group, criterion_main, Criterion};
use noisy_env::{
    data::util::collect_multiple,
    environment::{
        cart_pole::{CartPole, CartPoleAction, CartPoleObservation},
        Environment, Space,
    },
    wrapper::{
        observation::{
            DropoutObservationConfig, MixupObservationConfig, NormalObservationConfig,
            ObservationNoise, UniformObservationConfig, UniformScaleObservationConfig,
        },
        reward::{NormalRewardConfig, UniformRewardConfig, UniformScaleRewardConfig},
        Noisy,
    },
};
use rand::{rngs::StdRng, SeedableRng};

const STEPS: usize = 1_000;

fn rollout<E: Environment<Observation = CartPoleObservation, Action = CartPoleAction>>(
    env: &mut E,
    rng: &mut StdRng,
) {
    let mut policy = |_: &CartPoleObservation| CartPoleAction::sample(&mut *rng);
    collect_multiple(env, None, &mut policy, STEPS).unwrap();
}

pub fn observation_benchmark(c: &mut Criterion) {
    let transforms: Vec<(&str, ObservationNoise<CartPoleObservation>)> = vec![
        ("mixup", MixupObservationConfig::new().with_noise_rate(1.0).init()),
        ("dropout", DropoutObservationConfig::new().with_noise_rate(1.0).init()),
        ("normal", NormalObservationConfig::new().with_noise_rate(1.0).init()),
        ("uniform", UniformObservationConfig::new().with_noise_rate(1.0).init()),
        ("uniform scale", UniformScaleObservationConfig::new().with_noise_rate(1.0).init()),
    ];

    let mut rng = StdRng::seed_from_u64(0);
    let mut env = CartPole::new();
    c.bench_function("cart pole", |b| b.iter(|| rollout(&mut env, &mut rng)));

    for (name, transform) in transforms {
        let mut env = Noisy::seeded(CartPole::new(), transform, 0);
        c.bench_function(&format!("{name} observation"), |b| {
            b.iter(|| rollout(&mut env, &mut rng))
        });
    }
}

pub fn reward_benchmark(c: &mut Criterion) {
    let transforms = vec![
        ("uniform scale", UniformScaleRewardConfig::new().with_noise_rate(1.0).init()),
        ("uniform", UniformRewardConfig::new().with_noise_rate(1.0).init()),
        ("normal", NormalRewardConfig::new().with_noise_rate(1.0).init()),
    ];

    let mut rng = StdRng::seed_from_u64(0);
    for (name, transform) in transforms {
        let mut env = Noisy::seeded(CartPole::new(), transform, 0);
        c.bench_function(&format!("{name} reward"), |b| {
            b.iter(|| rollout(&mut env, &mut rng))
        });
    }
}

criterion_group!(benches, observation_benchmark, reward_benchmark);
criterion_main!(benches);
