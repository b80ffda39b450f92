use serde::{Deserialize, Serialize};

/// Identity of the user a chart is created for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartUser {
    pub username: String,
    pub display_name: Option<String>,
}

impl ChartUser {
    /// Name shown in chart headers: the display name if set, else the username.
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Static configuration handed to the chart service once, at chart creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub document_location: String,
    pub document_name: String,
    pub document_title: String,
    pub user: ChartUser,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            document_location: "localhost".to_string(),
            document_name: "Training_Name".to_string(),
            document_title: "Training_Title".to_string(),
            user: ChartUser {
                username: "Me".to_string(),
                display_name: None,
            },
        }
    }
}
