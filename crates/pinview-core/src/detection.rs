use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::geometry::Rect;

/// One detected object, as delivered by the detection service.
///
/// `bbox` is `[x, y, w, h]` in natural-image pixels, origin top-left.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "type", alias = "label")]
    pub label: String,
    pub bbox: [f64; 4],
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_false")]
    pub verified: bool,
    /// Position within its result set; stamped by [`DetectionSet::new`].
    #[serde(default)]
    pub index: usize,
}

impl Detection {
    pub fn new(label: impl Into<String>, bbox: [f64; 4], confidence: f64) -> Self {
        Self {
            label: label.into(),
            bbox,
            confidence,
            verified: false,
            index: 0,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn bbox_rect(&self) -> Rect {
        Rect::from_xywh(self.bbox)
    }
}

fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Ordered detections for a single image. Indices equal list positions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionSet {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    detections: Vec<Detection>,
}

impl DetectionSet {
    pub fn new(detections: Vec<Detection>) -> Self {
        let mut set = Self {
            image_path: None,
            detections,
        };
        set.stamp_indices();
        set
    }

    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    fn stamp_indices(&mut self) {
        for (i, det) in self.detections.iter_mut().enumerate() {
            det.index = i;
        }
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Detection> {
        self.detections.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }

    /// Detections whose confidence reaches `limit`.
    pub fn above(&self, limit: f64) -> impl Iterator<Item = &Detection> {
        self.detections.iter().filter(move |d| d.confidence >= limit)
    }

    /// Set the verified flag. Returns `false` if `index` does not exist.
    pub fn set_verified(&mut self, index: usize, verified: bool) -> bool {
        match self.detections.get_mut(index) {
            Some(det) => {
                det.verified = verified;
                true
            }
            None => false,
        }
    }

    /// `(verified, total)`.
    pub fn verified_counts(&self) -> (usize, usize) {
        let verified = self.detections.iter().filter(|d| d.verified).count();
        (verified, self.detections.len())
    }
}

/// Full response of one analysis run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub results: Vec<DetectionSet>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<String>,
}

impl AnalysisResponse {
    /// Remove and return the result set whose `image_path` ends with
    /// `file_name`, or the first set when none matches.
    pub fn take_for_image(&mut self, file_name: Option<&str>) -> Option<DetectionSet> {
        if self.results.is_empty() {
            return None;
        }
        let pos = file_name
            .and_then(|name| {
                self.results.iter().position(|set| {
                    set.image_path
                        .as_deref()
                        .is_some_and(|p| p.ends_with(name))
                })
            })
            .unwrap_or(0);
        Some(self.results.remove(pos))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionPayload {
    Bare(Vec<Detection>),
    Response(AnalysisResponse),
}

/// Decode detection JSON: either a bare array of detections or a full
/// `{ "results": [...], "errors": [...] }` response.
pub fn parse_detections(json: &str) -> Result<AnalysisResponse> {
    let payload: DetectionPayload = serde_json::from_str(json)?;
    let mut response = match payload {
        DetectionPayload::Bare(detections) => AnalysisResponse {
            results: vec![DetectionSet::new(detections)],
            errors: Vec::new(),
        },
        DetectionPayload::Response(response) => response,
    };
    for set in &mut response.results {
        set.stamp_indices();
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_verified_is_false() {
        let det: Detection =
            serde_json::from_str(r#"{"type":"car","bbox":[1,2,3,4],"confidence":0.9,"verified":null}"#)
                .unwrap();
        assert!(!det.verified);
        assert_eq!(det.label, "car");
    }

    #[test]
    fn missing_verified_is_false() {
        let det: Detection =
            serde_json::from_str(r#"{"label":"dog","bbox":[0,0,1,1],"confidence":0.5}"#).unwrap();
        assert!(!det.verified);
        assert_eq!(det.label, "dog");
    }

    #[test]
    fn new_set_stamps_positions() {
        let set = DetectionSet::new(vec![
            Detection::new("a", [0.0; 4], 0.9).with_index(7),
            Detection::new("b", [0.0; 4], 0.9).with_index(7),
        ]);
        let indices: Vec<usize> = set.iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }
}
