//! Suggested values offered by the entry forms.
//!
//! Tags stay free-form; these lists only seed pickers.

use serde::Serialize;

pub const INDUSTRIES: &[&str] = &[
    "Technology",
    "Financial Services",
    "Healthcare",
    "Manufacturing",
    "Retail",
    "Energy",
    "Telecommunications",
    "Government",
    "Education",
    "Other",
];

pub const FOUNDATIONAL_MODELS: &[&str] = &[
    "GPT-4",
    "GPT-3.5",
    "Claude 3.5",
    "Claude 3",
    "Gemini Pro",
    "Gemini Ultra",
    "Llama 3",
    "Llama 2",
    "Mistral",
    "Command R+",
    "PaLM 2",
    "Cohere",
];

pub const MODALITIES: &[&str] = &["Text", "Image", "Audio", "Video", "Code", "Multimodal"];

pub const COMPUTE_VENDORS: &[&str] = &[
    "NVIDIA",
    "Cisco",
    "Dell",
    "HPE",
    "Supermicro",
    "Lenovo",
    "IBM",
    "Fujitsu",
    "Inspur",
    "Huawei",
];

/// A managed AI service and the cloud that hosts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CloudServiceSuggestion {
    pub name: &'static str,
    pub provider: &'static str,
}

pub const CLOUD_SERVICES: &[CloudServiceSuggestion] = &[
    CloudServiceSuggestion {
        name: "AWS Bedrock",
        provider: "AWS",
    },
    CloudServiceSuggestion {
        name: "Azure OpenAI",
        provider: "Azure",
    },
    CloudServiceSuggestion {
        name: "Google Vertex AI",
        provider: "GCP",
    },
    CloudServiceSuggestion {
        name: "Palantir Foundry",
        provider: "Palantir",
    },
    CloudServiceSuggestion {
        name: "AWS SageMaker",
        provider: "AWS",
    },
    CloudServiceSuggestion {
        name: "Azure ML",
        provider: "Azure",
    },
    CloudServiceSuggestion {
        name: "IBM watsonx",
        provider: "IBM",
    },
];

/// All suggestion lists, serialized as one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    pub industries: &'static [&'static str],
    pub models: &'static [&'static str],
    pub modalities: &'static [&'static str],
    pub cloud_services: &'static [CloudServiceSuggestion],
    pub compute_vendors: &'static [&'static str],
}

/// Returns the built-in suggestion lists.
pub fn vocabulary() -> Vocabulary {
    Vocabulary {
        industries: INDUSTRIES,
        models: FOUNDATIONAL_MODELS,
        modalities: MODALITIES,
        cloud_services: CLOUD_SERVICES,
        compute_vendors: COMPUTE_VENDORS,
    }
}
