//! Semantic similarity using Model2Vec static embeddings

use crate::config::Config;
use crate::error::{Result, ScorerError};
use log::{debug, info, warn};
use model2vec_rs::model::StaticModel;
use std::sync::Arc;
use std::time::Instant;

/// Anything that turns a batch of texts into one vector per text
pub trait EmbeddingBackend: Send + Sync {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

pub struct Model2VecBackend {
    model: StaticModel,
    model_name: String,
}

impl Model2VecBackend {
    /// Load the configured model from a local directory or the Hugging Face Hub
    pub fn load(config: &Config) -> Result<Self> {
        let start_time = Instant::now();
        let location = config.embedding_model_location();

        info!("Loading Model2Vec embedding model from: {}", location.display());

        let model = StaticModel::from_pretrained(&location, None, None, None)
            .map_err(|e| ScorerError::Embedding(format!("Failed to load model: {}", e)))?;

        info!("Model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: config.models.embedding_model.clone(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl EmbeddingBackend for Model2VecBackend {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(self.model.encode(texts))
    }
}

/// Whole-document semantic similarity on [0, 1].
///
/// Long documents are split into word chunks, each chunk embedded, and the
/// chunk vectors averaged before the cosine comparison.
#[derive(Clone)]
pub struct SemanticSimilarityScorer {
    backend: Option<Arc<dyn EmbeddingBackend>>,
    chunk_size: usize,
}

impl SemanticSimilarityScorer {
    pub fn new(backend: Option<Arc<dyn EmbeddingBackend>>, chunk_size: usize) -> Self {
        Self {
            backend,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// 0.0 when either text is blank, no backend is configured, or the backend fails
    pub fn similarity(&self, text1: &str, text2: &str) -> f32 {
        let Some(backend) = &self.backend else {
            debug!("No embedding backend configured; semantic similarity is 0");
            return 0.0;
        };

        if text1.trim().is_empty() || text2.trim().is_empty() {
            return 0.0;
        }

        match self.document_vector(backend.as_ref(), text1).and_then(|a| {
            let b = self.document_vector(backend.as_ref(), text2)?;
            Ok((a, b))
        }) {
            Ok((a, b)) => match cosine_similarity(&a, &b) {
                Some(score) => score.clamp(0.0, 1.0),
                None => {
                    warn!("Degenerate embeddings (dims {} vs {}); semantic similarity is 0", a.len(), b.len());
                    0.0
                }
            },
            Err(e) => {
                warn!("Embedding backend failed: {}", e);
                0.0
            }
        }
    }

    /// Split on whitespace into chunks of at most `chunk_size` words
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        words
            .chunks(self.chunk_size)
            .map(|chunk| chunk.join(" "))
            .collect()
    }

    fn document_vector(&self, backend: &dyn EmbeddingBackend, text: &str) -> Result<Vec<f32>> {
        let chunks = self.chunk_text(text);
        let vectors = backend.encode(&chunks)?;

        if vectors.len() != chunks.len() {
            return Err(ScorerError::Embedding(format!(
                "Expected {} embeddings, backend returned {}",
                chunks.len(),
                vectors.len()
            )));
        }

        mean_vector(&vectors)
    }
}

fn mean_vector(vectors: &[Vec<f32>]) -> Result<Vec<f32>> {
    let first = vectors
        .first()
        .ok_or_else(|| ScorerError::Embedding("No embeddings returned".to_string()))?;

    if vectors.len() == 1 {
        return Ok(first.clone());
    }

    let dim = first.len();
    let mut mean = vec![0.0f32; dim];
    for vector in vectors {
        if vector.len() != dim {
            return Err(ScorerError::Embedding(format!(
                "Embedding dimensions don't match: {} vs {}",
                dim,
                vector.len()
            )));
        }
        for (acc, value) in mean.iter_mut().zip(vector) {
            *acc += value;
        }
    }

    let count = vectors.len() as f32;
    mean.iter_mut().for_each(|v| *v /= count);
    Ok(mean)
}

/// Cosine similarity, `None` for empty, mismatched or zero-norm vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        None
    } else {
        Some(dot_product / (norm_a * norm_b))
    }
}
