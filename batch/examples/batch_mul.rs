use ecloop_batch::{BatchConfig, BatchExecutor, PointInput, Submission};
use ecloop_curve::{Affine, RandomField, Scalar};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let executor = BatchExecutor::new(BatchConfig::from_env()).expect("executor");

    let g = PointInput::from(&Affine::generator());
    let mut submissions: Vec<Submission> = (0..8)
        .map(|_| Submission::new(g.clone(), Scalar::random(&mut rng).to_be_bytes().to_vec()))
        .collect();
    submissions.push(Submission::new(g, vec![0xff; 40]));

    for (index, result) in executor.run(&submissions).iter().enumerate() {
        match result {
            Ok(point) if point.is_infinity() => println!("{index}: identity"),
            Ok(point) => println!("{index}: x={} y={}", point.x, point.y),
            Err(err) => println!("{index}: rejected ({err})"),
        }
    }
}
