//! Benches for expression evaluation.
//!
//! Implemented benches:
//!
//! - Long chain of multiplications (stresses the operator scan and reduction)
//! - Deeply nested parentheses
//! - Nested function calls, which re-parse their args
//! - Variable substitution with chained variables

use criterion::{criterion_group, criterion_main, Bencher, Criterion, Throughput};

use std::collections::HashMap;

use infix_eval::{
    arith::{Checked, CheckedArithmetic},
    Environment,
};

const ELEMENTS: u64 = 50;
const DEPTH: usize = 32;

fn mul_chain() -> String {
    let values: Vec<_> = (0..ELEMENTS)
        .map(|i| format!("1.{}", (i * 7) % 10))
        .collect();
    values.join(" * ")
}

fn nested_parens() -> String {
    let mut expr = "1".to_owned();
    for i in 0..DEPTH {
        expr = format!("({expr} + {i})");
    }
    expr
}

fn bench_mul_chain(bencher: &mut Bencher<'_>) {
    let env = Environment::<f64>::standard_float();
    let expr = mul_chain();
    bencher.iter(|| env.evaluate(&expr).unwrap());
}

fn bench_int_mul_chain(bencher: &mut Bencher<'_>) {
    let env = Environment::<i64>::with_arithmetic(CheckedArithmetic::<Checked>::new());
    let values: Vec<_> = (0..ELEMENTS).map(|i| (i % 3 + 1).to_string()).collect();
    let expr = values.join(" * ") + " % 1000000007";
    bencher.iter(|| env.evaluate(&expr).unwrap());
}

fn bench_nested_parens(bencher: &mut Bencher<'_>) {
    let env = Environment::<f64>::standard_float();
    let expr = nested_parens();
    bencher.iter(|| env.evaluate(&expr).unwrap());
}

fn bench_nested_calls(bencher: &mut Bencher<'_>) {
    let env = Environment::<f64>::standard_float();
    let mut expr = "2".to_owned();
    for _ in 0..DEPTH {
        expr = format!("max(1, sqrt({expr}) * 2)");
    }
    bencher.iter(|| env.evaluate(&expr).unwrap());
}

fn bench_variables(bencher: &mut Bencher<'_>) {
    let vars: HashMap<String, String> = (0..DEPTH)
        .map(|i| {
            let value = if i == 0 { "1".to_owned() } else { format!("$v{}", i - 1) };
            (format!("v{i}"), value)
        })
        .collect();
    let env = Environment::<f64>::standard_float().with_resolver(vars);
    let expr = format!("$v{} + $v0 * 2", DEPTH - 1);
    bencher.iter(|| env.evaluate(&expr).unwrap());
}

fn evaluation_benches(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("evaluate");
    group.throughput(Throughput::Elements(ELEMENTS));
    group.bench_function("mul_chain", bench_mul_chain);
    group.bench_function("int_mul_chain", bench_int_mul_chain);
    group.finish();

    criterion.bench_function("nested_parens", bench_nested_parens);
    criterion.bench_function("nested_calls", bench_nested_calls);
    criterion.bench_function("variables", bench_variables);
}

criterion_group!(benches, evaluation_benches);
criterion_main!(benches);
