use review_blocks_engine::editing::{BlockFactory, SequentialIds};
use review_blocks_engine::models::{Block, BlockType};

// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_blocks(size: usize) -> Vec<Block> {
    let mut factory = BlockFactory::new(SequentialIds::new("bench"));
    (0..size)
        .map(|i| {
            let block_type = BlockType::ALL[i % BlockType::ALL.len()];
            factory.create_with_content(block_type, &format!("Block {i} content"))
        })
        .collect()
}

#[allow(dead_code)]
pub fn generate_article_json(size: usize) -> String {
    let article = review_blocks_engine::models::Article {
        title: "Benchmark article".to_string(),
        structured_content: generate_blocks(size),
        ..Default::default()
    };
    serde_json::to_string(&article).unwrap()
}
