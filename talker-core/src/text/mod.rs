//! Text handling around the model: segmentation, tokenization,
//! morphology and post-processing of generated tokens.

pub mod morph;
pub mod postprocess;
pub mod segmenter;
pub mod tokenizer;
