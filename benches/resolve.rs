use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use phpantom_solver::syntax::Node;
use phpantom_solver::{
    ClassInfo, FunctionInfo, SymbolTable, TypeExpr, TypeSet, VisitedTypes, classify_variables,
    find_method, resolve_type, resolve_types,
};

/// `\C0` declares `make(): static`; `\C{n}` extends `\C{n-1}`.
fn chain_index(depth: usize) -> SymbolTable {
    let index = SymbolTable::new();
    index.insert_class(
        ClassInfo::new("\\C0")
            .with_method(FunctionInfo::new("make", TypeSet::from_literals(["static"]))),
    );
    for n in 1..depth {
        index.insert_class(ClassInfo::new(format!("\\C{n}")).extends(format!("\\C{}", n - 1)));
    }
    index.mark_indexing_complete();
    index
}

/// `width` globals, each typed as one class plus the next global.
fn wide_index(width: usize) -> (SymbolTable, TypeSet) {
    let index = SymbolTable::new();
    let mut types = TypeSet::new();
    for n in 0..width {
        let mut declared = TypeSet::from_literals([format!("\\T{n}")]);
        declared.insert(TypeExpr::global_var(format!("g{}", (n + 1) % width)));
        index.insert_global_var(&format!("g{n}"), declared);
        types.insert(TypeExpr::global_var(format!("g{n}")));
    }
    index.mark_indexing_complete();
    (index, types)
}

fn bench_inheritance_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("inheritance_chain");
    for depth in [8usize, 64, 512] {
        let index = chain_index(depth);
        let leaf = format!("\\C{}", depth - 1);
        let expr = TypeExpr::static_call(leaf.clone(), "make");

        group.bench_with_input(BenchmarkId::new("find_method", depth), &leaf, |b, leaf| {
            b.iter(|| black_box(find_method(&index, leaf, "make")));
        });
        group.bench_with_input(BenchmarkId::new("static_call", depth), &expr, |b, expr| {
            b.iter(|| black_box(resolve_type(&index, expr, &mut VisitedTypes::new())));
        });
    }
    group.finish();
}

fn bench_wide_type_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_type_set");
    for width in [16usize, 256] {
        let (index, types) = wide_index(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &types, |b, types| {
            b.iter(|| black_box(resolve_types(&index, types, &mut VisitedTypes::new())));
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let index = SymbolTable::new();
    index.mark_indexing_complete();
    let stmts = (0..200)
        .map(|n| {
            Node::stmt(Node::assign(
                Node::dim(Node::var(format!("a{n}")), Node::var("i")),
                Node::method_call(Node::var("obj"), "get", vec![Node::var(format!("b{n}"))]),
            ))
        })
        .collect();
    let tree = Node::stmts(stmts);

    c.bench_function("classify_200_statements", |b| {
        b.iter(|| black_box(classify_variables(&index, &tree)));
    });
}

criterion_group!(
    benches,
    bench_inheritance_chain,
    bench_wide_type_set,
    bench_classify
);
criterion_main!(benches);
