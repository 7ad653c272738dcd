use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::validation::required;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    #[default]
    Despesa,
    Receita,
}

impl CategoryKind {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryKind::Despesa => "Despesas",
            CategoryKind::Receita => "Receitas",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo", default)]
    pub kind: CategoryKind,
    #[serde(rename = "cor", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.name, "nome")
    }
}

/// Name for a category id, falling back to "Sem categoria".
pub fn category_name(categories: &[Category], id: Option<i64>) -> String {
    id.and_then(|id| categories.iter().find(|c| c.id == Some(id)))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

pub const UNCATEGORIZED: &str = "Sem categoria";
