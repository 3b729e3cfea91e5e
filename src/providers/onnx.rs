//! Local ONNX embedding provider
//!
//! Runs all-MiniLM-L6-v2 (or a compatible sentence-transformers model) in an
//! ONNX Runtime session, with mean pooling and L2 normalization. Model and
//! tokenizer files are fetched from the HuggingFace hub into a cache
//! directory on first use and loaded exactly once per process.

use async_trait::async_trait;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;
use std::path::Path;
use tokenizers::Tokenizer;

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;

/// ONNX-based text embedder
pub struct OnnxEmbedder {
    /// ONNX Runtime session; `run` needs exclusive access
    session: Mutex<Session>,
    /// HuggingFace tokenizer
    tokenizer: Tokenizer,
    /// Embedding dimensions
    dimensions: usize,
    /// Maximum token sequence length
    max_length: usize,
    /// Texts per inference call
    batch_size: usize,
}

impl OnnxEmbedder {
    /// Load the model, downloading weights and tokenizer when not cached.
    ///
    /// Every failure on this path is `ModelUnavailable`; callers construct
    /// the embedder once and keep it for the lifetime of the run.
    pub async fn new(config: &EmbeddingConfig) -> Result<Self> {
        tracing::info!("Initializing ONNX embedder with model: {}", config.model);

        std::fs::create_dir_all(&config.cache_dir).map_err(|e| {
            Error::model_unavailable(format!("Failed to create cache directory: {}", e))
        })?;

        let model_path = config.cache_dir.join("model.onnx");
        let tokenizer_path = config.cache_dir.join("tokenizer.json");

        if !model_path.exists() {
            download_from_hub(&config.model, "onnx/model.onnx", &model_path).await?;
        }
        if !tokenizer_path.exists() {
            download_from_hub(&config.model, "tokenizer.json", &tokenizer_path).await?;
        }

        let session = Session::builder()
            .map_err(|e| Error::model_unavailable(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::model_unavailable(format!("Failed to set optimization level: {}", e)))?
            .with_intra_threads(4)
            .map_err(|e| Error::model_unavailable(format!("Failed to set threads: {}", e)))?
            .commit_from_file(&model_path)
            .map_err(|e| Error::model_unavailable(format!("Failed to load model: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::model_unavailable(format!("Failed to load tokenizer: {}", e)))?;

        tracing::info!("ONNX embedder ready ({} dimensions)", config.dimensions);

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            dimensions: config.dimensions,
            max_length: config.max_length,
            batch_size: config.batch_size,
        })
    }

    /// Run one inference pass over a batch of texts
    fn run_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let batch_size = texts.len();

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| Error::embedding(format!("Tokenization failed: {}", e)))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .min(self.max_length);

        let mut input_ids = vec![0i64; batch_size * max_len];
        let mut attention_mask = vec![0i64; batch_size * max_len];
        let mut token_type_ids = vec![0i64; batch_size * max_len];

        for (i, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let types = encoding.get_type_ids();
            let len = ids.len().min(max_len);

            for j in 0..len {
                input_ids[i * max_len + j] = ids[j] as i64;
                attention_mask[i * max_len + j] = mask[j] as i64;
                token_type_ids[i * max_len + j] = types[j] as i64;
            }
        }

        let input_ids_tensor = Tensor::from_array((
            vec![batch_size, max_len],
            input_ids.into_boxed_slice(),
        ))
        .map_err(|e| Error::embedding(format!("Input tensor creation failed: {}", e)))?;

        let attention_mask_tensor = Tensor::from_array((
            vec![batch_size, max_len],
            attention_mask.clone().into_boxed_slice(),
        ))
        .map_err(|e| Error::embedding(format!("Attention mask tensor creation failed: {}", e)))?;

        let token_type_ids_tensor = Tensor::from_array((
            vec![batch_size, max_len],
            token_type_ids.into_boxed_slice(),
        ))
        .map_err(|e| Error::embedding(format!("Token type tensor creation failed: {}", e)))?;

        let inputs = vec![
            ("input_ids", input_ids_tensor.into_dyn()),
            ("attention_mask", attention_mask_tensor.into_dyn()),
            ("token_type_ids", token_type_ids_tensor.into_dyn()),
        ];

        let mut session = self.session.lock();
        let outputs = session
            .run(inputs)
            .map_err(|e| Error::embedding(format!("Inference failed: {}", e)))?;

        let output_iter: Vec<_> = outputs.iter().collect();
        let output = output_iter
            .iter()
            .find(|(name, _)| *name == "last_hidden_state")
            .or_else(|| output_iter.first())
            .map(|(_, v)| v)
            .ok_or_else(|| Error::embedding("No output tensor".to_string()))?;

        let (tensor_shape, tensor_data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::embedding(format!("Failed to extract tensor: {}", e)))?;

        let dims: Vec<usize> = tensor_shape.iter().map(|&d| d as usize).collect();
        let hidden_size = dims.get(2).copied().unwrap_or(self.dimensions);

        // Mean pooling over unmasked tokens, then L2 normalization
        let mut embeddings = Vec::with_capacity(batch_size);
        for i in 0..batch_size {
            let mut pooled = vec![0.0f32; hidden_size];
            let mut count = 0.0f32;

            for j in 0..max_len {
                let mask_val = attention_mask[i * max_len + j] as f32;
                if mask_val > 0.0 {
                    for k in 0..hidden_size {
                        let idx = i * max_len * hidden_size + j * hidden_size + k;
                        if idx < tensor_data.len() {
                            pooled[k] += tensor_data[idx] * mask_val;
                        }
                    }
                    count += mask_val;
                }
            }

            if count > 0.0 {
                for val in &mut pooled {
                    *val /= count;
                }
            }

            let norm: f32 = pooled.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                for val in &mut pooled {
                    *val /= norm;
                }
            }

            embeddings.push(pooled);
        }

        Ok(embeddings)
    }
}

#[async_trait]
impl EmbeddingProvider for OnnxEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.run_batch(&[text])?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("Empty embedding result".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut all_embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            let refs: Vec<&str> = batch.iter().map(String::as_str).collect();
            all_embeddings.extend(self.run_batch(&refs)?);
        }
        Ok(all_embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        // Model is loaded in the constructor; an existing session is healthy
        Ok(true)
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

/// Fetch one model file from the sentence-transformers hub namespace
async fn download_from_hub(model_name: &str, remote_file: &str, target: &Path) -> Result<()> {
    let url = format!(
        "https://huggingface.co/sentence-transformers/{}/resolve/main/{}",
        model_name, remote_file
    );

    tracing::info!("Downloading {}", url);

    let response = reqwest::get(&url)
        .await
        .map_err(|e| Error::model_unavailable(format!("Download failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::model_unavailable(format!(
            "Download of {} failed: HTTP {}",
            remote_file,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::model_unavailable(format!("Failed to read download: {}", e)))?;

    std::fs::write(target, &bytes)
        .map_err(|e| Error::model_unavailable(format!("Failed to save {}: {}", remote_file, e)))?;

    tracing::info!("Saved {} ({} bytes)", target.display(), bytes.len());

    Ok(())
}
