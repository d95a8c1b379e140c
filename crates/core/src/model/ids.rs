use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::PageError;

/// One of the three explainer pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    MlExplainer,
    PromptFramework,
    TokenExplainer,
}

impl PageId {
    pub const ALL: [PageId; 3] = [
        PageId::MlExplainer,
        PageId::PromptFramework,
        PageId::TokenExplainer,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PageId::MlExplainer => "ml-explainer",
            PageId::PromptFramework => "prompt-framework",
            PageId::TokenExplainer => "token-explainer",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            PageId::MlExplainer => "Machine Learning Pipeline",
            PageId::PromptFramework => "Prompt Framework",
            PageId::TokenExplainer => "Token Explorer",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = PageError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ml" | "ml-explainer" => Ok(PageId::MlExplainer),
            "prompt" | "prompt-framework" => Ok(PageId::PromptFramework),
            "token" | "token-explainer" => Ok(PageId::TokenExplainer),
            other => Err(PageError::UnknownPage(other.to_string())),
        }
    }
}

macro_rules! name_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            #[must_use]
            pub const fn from_static(name: &'static str) -> Self {
                Self(Cow::Borrowed(name))
            }

            #[must_use]
            pub fn new(name: impl Into<String>) -> Self {
                Self(Cow::Owned(name.into()))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&'static str> for $name {
            fn from(name: &'static str) -> Self {
                Self::from_static(name)
            }
        }
    };
}

name_id!(
    /// Name of a top-level panel (`hero`, `pipeline`, `summary`, ...).
    ViewId
);
name_id!(
    /// Name of an element inside a view: a control, a label, a chart.
    ElementId
);
name_id!(
    /// Name of a scripted scene (`pipeline`, `tokenization`, ...).
    SceneId
);
