use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::chatbot::Reply;
use super::session_config::{SessionConfig, UserRole};

/// Usage counters exposed on the admin endpoint.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub replies: u64,
    pub resets: u64,
    pub intent_usage: HashMap<String, u64>,
    pub material_usage: HashMap<String, u64>,
    pub role_usage: HashMap<String, u64>,
    pub study_mode_usage: HashMap<String, u64>,
}

fn bump(map: &mut HashMap<String, u64>, key: &str) {
    *map.entry(key.to_string()).or_insert(0) += 1;
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    /// Counts one generated reply against the selections it was produced under.
    /// The study mode only counts for students.
    pub async fn record(&self, reply: &Reply, config: &SessionConfig) {
        let mut data = self.inner.write().await;
        data.replies += 1;
        bump(&mut data.intent_usage, reply.intent.as_str());
        if let Some(material) = reply.material {
            bump(&mut data.material_usage, material.key());
        }
        bump(&mut data.role_usage, config.role.key());
        if config.role == UserRole::Student {
            bump(&mut data.study_mode_usage, config.study_mode.key());
        }
    }

    pub async fn record_reset(&self) {
        self.inner.write().await.resets += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::chatbot::Intent;
    use crate::services::session_config::{MaterialType, StudyMode};

    fn reply(intent: Intent, material: Option<MaterialType>) -> Reply {
        Reply { intent, material, text: String::new() }
    }

    #[tokio::test]
    async fn counts_accumulate() {
        let metrics = MetricsManager::new();
        let teacher = SessionConfig::default();
        let student = SessionConfig {
            role: UserRole::Student,
            study_mode: StudyMode::ExamPrep,
            ..SessionConfig::default()
        };

        metrics.record(&reply(Intent::Greeting, None), &teacher).await;
        metrics.record(&reply(Intent::Material, Some(MaterialType::Worksheet)), &teacher).await;
        metrics.record(&reply(Intent::Greeting, None), &student).await;
        metrics.record_reset().await;

        let data = metrics.get_metrics().await;
        assert_eq!(data.replies, 3);
        assert_eq!(data.resets, 1);
        assert_eq!(data.intent_usage.get("Greeting"), Some(&2));
        assert_eq!(data.material_usage.get("worksheet"), Some(&1));
        assert!(data.material_usage.get("quiz").is_none());
        assert_eq!(data.role_usage.get("teacher"), Some(&2));
        assert_eq!(data.study_mode_usage.get("examPrep"), Some(&1));
        assert_eq!(data.study_mode_usage.len(), 1);
    }
}
