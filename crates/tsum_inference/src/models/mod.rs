use std::sync::Arc;

use tsum_core::ModelLoader;

pub mod lexical;

#[cfg(feature = "bert")]
pub mod bert;

/// Create the default model loader for this build.
///
/// With the `bert` feature enabled this loads real BART/T5 weights through
/// `rust-bert`; otherwise the always-available extractive backend is used.
pub fn create_loader() -> Arc<dyn ModelLoader> {
    #[cfg(feature = "bert")]
    return Arc::new(bert::BertLoader);
    #[cfg(not(feature = "bert"))]
    Arc::new(lexical::LexicalLoader)
}
