//! The feature matrix: one declarative registry driving every generator.
//!
//! # Design
//!
//! Each optional feature owns a set of environment variables, a compose
//! passthrough block, and a documentation section. The environment
//! synthesizer, the compose generator, and the documentation synthesizer all
//! iterate [`FEATURE_REGISTRY`] with the same gating predicate, so the three
//! artifact kinds cannot drift apart: a variable appears in the compose
//! passthrough list exactly when it appears in the generated `.env`.
//!
//! Adding a feature: add the enum variant, a registry entry, the flag on
//! `ProjectOptions`, and the value arm in the env service. Nothing else
//! changes.

use crate::domain::options::ProjectOptions;
use std::fmt;

/// An independently toggleable feature of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    WebPush,
    Email,
    OAuth,
    Payments,
    Gemini,
}

impl Feature {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WebPush => "web-push",
            Self::Email => "email",
            Self::OAuth => "oauth",
            Self::Payments => "payments",
            Self::Gemini => "gemini",
        }
    }

    /// The gating predicate shared by every generator.
    pub fn is_enabled(&self, options: &ProjectOptions) -> bool {
        match self {
            Self::WebPush => options.include_web_push,
            Self::Email => options.include_email,
            Self::OAuth => options.include_oauth,
            Self::Payments => options.include_payments,
            Self::Gemini => options.include_gemini,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry entry: a feature, its environment variable keys, and the heading
/// of its documentation section.
#[derive(Debug)]
pub struct FeatureDef {
    pub feature: Feature,
    /// Keys written to `.env` and passed through in compose service blocks,
    /// in emission order.
    pub env_keys: &'static [&'static str],
    /// Section heading in the generated README.
    pub doc_title: &'static str,
}

/// The single source of truth for the flag → variable → stanza → section
/// mapping. Ordering here is emission ordering in every artifact.
pub const FEATURE_REGISTRY: &[FeatureDef] = &[
    FeatureDef {
        feature: Feature::WebPush,
        env_keys: &["VAPID_PUBLIC_KEY", "VAPID_PRIVATE_KEY"],
        doc_title: "Web Push",
    },
    FeatureDef {
        feature: Feature::Email,
        env_keys: &[
            "MAIL_HOST",
            "MAIL_PORT",
            "MAIL_USER",
            "MAIL_PASS",
            "MAIL_LOGO",
            "DEFAULT_MAIL_PROVIDER",
            "RESEND_API_KEY",
        ],
        doc_title: "Email Configuration",
    },
    FeatureDef {
        feature: Feature::OAuth,
        env_keys: &[
            "GOOGLE_CLIENT_ID",
            "GOOGLE_CLIENT_SECRET",
            "GOOGLE_OAUTH_REDIRECT_URI",
        ],
        doc_title: "Google OAuth",
    },
    FeatureDef {
        feature: Feature::Payments,
        env_keys: &["PAY_API_KEY"],
        doc_title: "Payments",
    },
    FeatureDef {
        feature: Feature::Gemini,
        env_keys: &["GEMINI_API_KEY"],
        doc_title: "Google Gemini AI",
    },
];

/// Registry entries whose feature is enabled for the given options.
pub fn enabled_features(options: &ProjectOptions) -> impl Iterator<Item = &'static FeatureDef> + '_ {
    FEATURE_REGISTRY
        .iter()
        .filter(|def| def.feature.is_enabled(options))
}
