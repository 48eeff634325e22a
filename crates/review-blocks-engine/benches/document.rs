use criterion::{Criterion, criterion_group, criterion_main};
use review_blocks_engine::editing::{BlockDocument, BlockFactory, SequentialIds};
use review_blocks_engine::models::{Article, BlockType};
use std::hint::black_box;
mod common;

fn bench_document_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_creation");
    group.sample_size(20);

    let blocks = common::generate_blocks(500);
    group.bench_function("from_blocks", |b| {
        b.iter(|| {
            let doc = BlockDocument::from_blocks(black_box(blocks.clone()));
            black_box(doc);
        });
    });

    let json = common::generate_article_json(500);
    group.bench_function("parse_article", |b| {
        b.iter(|| {
            let article: Article = serde_json::from_str(black_box(&json)).unwrap();
            black_box(article);
        });
    });

    group.finish();
}

fn bench_document_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_operations");
    group.sample_size(20);

    let doc = BlockDocument::from_blocks(common::generate_blocks(500));
    let first = doc.blocks()[0].id.clone();
    let middle = doc.blocks()[250].id.clone();

    group.bench_function("move_first_to_last", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            black_box(doc.move_block(&first, 499));
        });
    });

    group.bench_function("insert_middle", |b| {
        let mut factory = BlockFactory::new(SequentialIds::new("ins"));
        b.iter(|| {
            let mut doc = doc.clone();
            let block = factory.create(BlockType::Paragraph);
            black_box(doc.insert(block, 250).unwrap());
        });
    });

    group.bench_function("remove_middle", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            black_box(doc.remove(&middle));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_document_creation, bench_document_operations);
criterion_main!(benches);
