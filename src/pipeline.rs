use crate::{
    image_utils::{transform_image, DecodeError},
    labels::{self, Category, LabelEntry, LABEL_COUNT},
    model_service::{InferenceError, ModelService},
    nutrition::{CalorieInfo, CalorieLookup},
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    Decode(#[from] DecodeError),
    #[error("{0}")]
    Inference(#[from] InferenceError),
    #[error("Inference task failed: {0}")]
    Task(#[from] JoinError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub class_index: usize,
    pub label: String,
    pub confidence: f32,
    pub category: Category,
}

/// Shared classification pipeline used by both the page and the JSON API.
pub struct ClassificationPipeline {
    model_service: Arc<dyn ModelService>,
    calorie_lookup: Arc<dyn CalorieLookup>,
}

impl ClassificationPipeline {
    pub fn new(model_service: Arc<dyn ModelService>, calorie_lookup: Arc<dyn CalorieLookup>) -> Self {
        Self {
            model_service,
            calorie_lookup,
        }
    }

    /// Decodes, normalizes and classifies an image. Runs on the blocking pool.
    #[instrument(skip(self, image_data), fields(bytes = image_data.len()))]
    pub async fn classify(&self, image_data: Vec<u8>) -> Result<PredictionResult, PipelineError> {
        let model_service = self.model_service.clone();
        let scores = tokio::task::spawn_blocking(move || -> Result<Vec<f32>, PipelineError> {
            let input = transform_image(&image_data)?;
            Ok(model_service.predict(&input)?)
        })
        .await??;

        let prediction = resolve_prediction(&scores)?;
        tracing::debug!(
            "Predicted {} ({}) with confidence {:.3}",
            prediction.label,
            prediction.category,
            prediction.confidence
        );

        Ok(prediction)
    }

    pub async fn enrich(&self, label: &str) -> CalorieInfo {
        self.calorie_lookup.lookup(label).await
    }

    pub fn labels(&self) -> Vec<LabelEntry> {
        labels::label_entries()
    }
}

/// Turns a score vector into the winning label and its display category.
pub fn resolve_prediction(scores: &[f32]) -> Result<PredictionResult, InferenceError> {
    if scores.len() != LABEL_COUNT {
        return Err(InferenceError::UnexpectedOutput {
            expected: LABEL_COUNT,
            actual: scores.len(),
        });
    }

    let (class_index, confidence) = labels::argmax(scores).ok_or(InferenceError::NoScores)?;
    let label = labels::label_for(class_index).ok_or(InferenceError::NoScores)?;
    if !Category::is_known(&label) {
        tracing::warn!("Predicted label {} has no category, defaulting to fruit", label);
    }

    Ok(PredictionResult {
        class_index,
        category: Category::of(&label),
        label,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use ndarray::{Array, Ix4};
    use std::io::Cursor;

    /// Scores the image by its mean red intensity so predictions depend on the input.
    struct MeanRedModel;

    impl ModelService for MeanRedModel {
        fn predict(&self, input: &Array<f32, Ix4>) -> Result<Vec<f32>, InferenceError> {
            if input.shape() != &[1, 224, 224, 3] {
                return Err(InferenceError::Input(format!("{:?}", input.shape())));
            }
            let red = input.slice(ndarray::s![0, .., .., 0]).mean().unwrap_or(0.0);
            let winner = ((red * (LABEL_COUNT - 1) as f32).round() as usize).min(LABEL_COUNT - 1);
            let mut scores = vec![0.0; LABEL_COUNT];
            scores[winner] = 1.0;
            Ok(scores)
        }
    }

    struct FixedModel(Vec<f32>);

    impl ModelService for FixedModel {
        fn predict(&self, _input: &Array<f32, Ix4>) -> Result<Vec<f32>, InferenceError> {
            Ok(self.0.clone())
        }
    }

    struct FixedCalories;

    #[async_trait]
    impl CalorieLookup for FixedCalories {
        async fn lookup(&self, label: &str) -> CalorieInfo {
            match label {
                "Apple" => CalorieInfo::Found("52".to_string()),
                _ => CalorieInfo::NotFound,
            }
        }
    }

    fn pipeline(model: impl ModelService) -> ClassificationPipeline {
        ClassificationPipeline::new(Arc::new(model), Arc::new(FixedCalories))
    }

    fn png(red: u8) -> Vec<u8> {
        let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(50, 50, Rgb([red, 20, 20]));
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    #[tokio::test]
    async fn test_classify() {
        let pipeline = pipeline(MeanRedModel);

        let black = pipeline.classify(png(0)).await.unwrap();
        assert_eq!(black.class_index, 0);
        assert_eq!(black.label, "Apple");
        assert_eq!(black.category, Category::Fruit);

        let red = pipeline.classify(png(255)).await.unwrap();
        assert_eq!(red.class_index, 35);
        assert_eq!(red.label, "Watermelon");
        assert_eq!(red.confidence, 1.0);
    }

    #[tokio::test]
    async fn test_classify_is_idempotent() {
        let pipeline = pipeline(MeanRedModel);
        let image = png(90);

        let first = pipeline.classify(image.clone()).await.unwrap();
        for _ in 0..3 {
            assert_eq!(pipeline.classify(image.clone()).await.unwrap(), first);
        }
    }

    #[tokio::test]
    async fn test_classify_rejects_undecodable_image() {
        let pipeline = pipeline(MeanRedModel);

        let result = pipeline.classify(b"not an image".to_vec()).await;

        assert!(matches!(result, Err(PipelineError::Decode(_))));
    }

    #[tokio::test]
    async fn test_classify_rejects_wrong_output_length() {
        let pipeline = pipeline(FixedModel(vec![0.5; 10]));

        let result = pipeline.classify(png(10)).await;

        assert!(matches!(
            result,
            Err(PipelineError::Inference(InferenceError::UnexpectedOutput {
                expected: 36,
                actual: 10
            }))
        ));
    }

    #[tokio::test]
    async fn test_enrich_delegates_to_lookup() {
        let pipeline = pipeline(MeanRedModel);

        assert_eq!(pipeline.enrich("Apple").await.to_string(), "52 calories");
        assert_eq!(pipeline.enrich("Garlic").await, CalorieInfo::NotFound);
    }

    #[test]
    fn test_resolve_prediction() {
        let mut scores = vec![0.01; LABEL_COUNT];
        scores[29] = 0.7;

        let prediction = resolve_prediction(&scores).unwrap();

        assert_eq!(prediction.label, "Soy beans");
        assert_eq!(prediction.category, Category::Vegetable);
        assert_eq!(prediction.confidence, 0.7);
    }

    #[test]
    fn test_resolve_prediction_garlic_falls_back_to_fruit() {
        let mut scores = vec![0.01; LABEL_COUNT];
        scores[12] = 0.6;

        let prediction = resolve_prediction(&scores).unwrap();

        assert_eq!(prediction.label, "Garlic");
        assert_eq!(prediction.category, Category::Fruit);
    }

    #[test]
    fn test_resolve_prediction_all_nan() {
        let scores = vec![f32::NAN; LABEL_COUNT];

        assert!(matches!(
            resolve_prediction(&scores),
            Err(InferenceError::NoScores)
        ));
    }
}
