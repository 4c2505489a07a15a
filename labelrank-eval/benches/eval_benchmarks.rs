use criterion::{Criterion, black_box, criterion_group, criterion_main};
use labelrank_eval::{
    Evaluator, GroundTruth, PredictionSet, Vocabulary, argsort_descending,
    calculate_basic_metrics,
};

fn synthetic_batch(docs: i64, labels: usize) -> (Vocabulary, GroundTruth, PredictionSet) {
    let vocab = Vocabulary::new((0..labels).map(|i| format!("label-{i}")));
    let gt: GroundTruth = (0..docs)
        .map(|d| {
            let relevant = (0..labels)
                .filter(|l| (*l as i64 + d) % 7 == 0)
                .map(|l| format!("label-{l}"))
                .collect();
            (d, relevant)
        })
        .collect();

    let mut predictions = PredictionSet::default();
    for d in 0..docs {
        for l in (0..labels).step_by(3) {
            let confidence = ((l as i64 * 31 + d * 17) % 101) as f64 / 100.0;
            predictions.confidences.push(confidence);
            predictions.pairs.push((d, format!("label-{l}")));
        }
    }
    (vocab, gt, predictions)
}

fn bench_evaluation(c: &mut Criterion) {
    let (vocab, gt, predictions) = synthetic_batch(200, 500);
    let evaluator = Evaluator::new(&vocab);

    c.bench_function("evaluate_200_docs_500_labels", |b| {
        b.iter(|| evaluator.evaluate(black_box(&predictions), black_box(&gt)))
    });

    c.bench_function("evaluate_detailed_200_docs_500_labels", |b| {
        b.iter(|| evaluator.evaluate_detailed(black_box(&predictions), black_box(&gt)))
    });
}

fn bench_ranking(c: &mut Criterion) {
    let scores: Vec<f64> = (0..2000).map(|i| ((i * 7919) % 1000) as f64 / 1000.0).collect();
    c.bench_function("argsort_descending_2000", |b| {
        b.iter(|| argsort_descending(black_box(&scores)))
    });

    let rows: Vec<Vec<bool>> = (0..500)
        .map(|r| (0..200).map(|c| (r + c) % 11 == 0).collect())
        .collect();
    c.bench_function("basic_metrics_500x200", |b| {
        b.iter(|| calculate_basic_metrics(black_box(&rows)))
    });
}

criterion_group!(benches, bench_evaluation, bench_ranking);
criterion_main!(benches);
