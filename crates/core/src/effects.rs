//! Effect, procedure and age-progression identifiers.
//!
//! Request strings are parsed leniently: unknown names never fail, they map
//! to a catch-all variant that carries the original text so the generic
//! filter chain and generic prompt can still use it.

use serde::{Serialize, Serializer};

use crate::regions::BoundingBox;

/* --------------------------------------------------------------------------
Face effects
-------------------------------------------------------------------------- */

/// A FaceApp-style effect name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FaceEffect {
    Young,
    Old,
    Male,
    Female,
    Smile,
    Laugh,
    Beauty,
    Makeup,
    HairColor,
    Beard,
    EyeColor,
    EyeSize,
    Glow,
    Smooth,
    Other(String),
}

impl FaceEffect {
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "young" => FaceEffect::Young,
            "old" => FaceEffect::Old,
            "male" => FaceEffect::Male,
            "female" => FaceEffect::Female,
            "smile" => FaceEffect::Smile,
            "laugh" => FaceEffect::Laugh,
            "beauty" => FaceEffect::Beauty,
            "makeup" => FaceEffect::Makeup,
            "hair_color" => FaceEffect::HairColor,
            "beard" => FaceEffect::Beard,
            "eye_color" => FaceEffect::EyeColor,
            "eye_size" => FaceEffect::EyeSize,
            "glow" => FaceEffect::Glow,
            "smooth" => FaceEffect::Smooth,
            other => FaceEffect::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FaceEffect::Young => "young",
            FaceEffect::Old => "old",
            FaceEffect::Male => "male",
            FaceEffect::Female => "female",
            FaceEffect::Smile => "smile",
            FaceEffect::Laugh => "laugh",
            FaceEffect::Beauty => "beauty",
            FaceEffect::Makeup => "makeup",
            FaceEffect::HairColor => "hair_color",
            FaceEffect::Beard => "beard",
            FaceEffect::EyeColor => "eye_color",
            FaceEffect::EyeSize => "eye_size",
            FaceEffect::Glow => "glow",
            FaceEffect::Smooth => "smooth",
            FaceEffect::Other(name) => name,
        }
    }

    /// Canned sample image returned when both processing paths fail.
    pub fn demo_url(&self) -> &'static str {
        match self {
            FaceEffect::Young => DEMO_YOUNG,
            FaceEffect::Old => DEMO_OLD,
            FaceEffect::Male => DEMO_MALE,
            FaceEffect::Female => DEMO_FEMALE,
            FaceEffect::Smile => DEMO_SMILE,
            FaceEffect::Makeup => DEMO_MAKEUP,
            _ => DEMO_BEAUTY,
        }
    }
}

impl Serialize for FaceEffect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

const DEMO_YOUNG: &str = "https://images.unsplash.com/photo-1494790108755-2616b612b1db?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const DEMO_OLD: &str = "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const DEMO_MALE: &str = "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const DEMO_FEMALE: &str = "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const DEMO_SMILE: &str = "https://images.unsplash.com/photo-1554151228-14d9def656e4?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const DEMO_BEAUTY: &str = "https://images.unsplash.com/photo-1580489944761-15a19d654956?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";
const DEMO_MAKEUP: &str = "https://images.unsplash.com/photo-1616683693504-3ea7e9ad6fec?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400";

/* --------------------------------------------------------------------------
Surgical procedures
-------------------------------------------------------------------------- */

/// A simulated surgical procedure. Missing `procedureType` defaults to
/// rhinoplasty; unknown names use the general enhancement chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Procedure {
    Rhinoplasty,
    NoseSurgery,
    Dental,
    Facelift,
    ScarRemoval,
    General(String),
}

impl Procedure {
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(str::trim).filter(|s| !s.is_empty()) {
            None | Some("rhinoplasty") => Procedure::Rhinoplasty,
            Some("nose_surgery") => Procedure::NoseSurgery,
            Some("dental") => Procedure::Dental,
            Some("facelift") => Procedure::Facelift,
            Some("scar_removal") => Procedure::ScarRemoval,
            Some(other) => Procedure::General(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Procedure::Rhinoplasty => "rhinoplasty",
            Procedure::NoseSurgery => "nose_surgery",
            Procedure::Dental => "dental",
            Procedure::Facelift => "facelift",
            Procedure::ScarRemoval => "scar_removal",
            Procedure::General(name) => name,
        }
    }

    /// Nose procedures fall back to the nose beautification chain.
    pub fn is_nose(&self) -> bool {
        matches!(self, Procedure::Rhinoplasty | Procedure::NoseSurgery)
    }
}

/// Nose beautification styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoseStyle {
    Refinement,
    Narrowing,
    Straightening,
    TipReshaping,
    BridgeAdjustment,
}

impl NoseStyle {
    pub const ALL: [NoseStyle; 5] = [
        NoseStyle::Refinement,
        NoseStyle::Narrowing,
        NoseStyle::Straightening,
        NoseStyle::TipReshaping,
        NoseStyle::BridgeAdjustment,
    ];

    /// Exact wire name lookup. Unlike effects, an unknown style is an error
    /// for the caller to report.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|style| style.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoseStyle::Refinement => "refinement",
            NoseStyle::Narrowing => "narrowing",
            NoseStyle::Straightening => "straightening",
            NoseStyle::TipReshaping => "tip_reshaping",
            NoseStyle::BridgeAdjustment => "bridge_adjustment",
        }
    }
}

/// Intensity used by the nose fallback when the request has none.
pub const NOSE_FALLBACK_INTENSITY: u8 = 60;

pub const DEFAULT_NOSE_STYLE: NoseStyle = NoseStyle::Refinement;

/// Descriptive nose assessment returned by `analyze-nose`.
///
/// The descriptors are a fixed baseline; only `nose_box` depends on the
/// photo, and only when a face mesh was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoseAssessment {
    pub nose_width: &'static str,
    pub bridge_shape: &'static str,
    pub tip_definition: &'static str,
    pub symmetry: &'static str,
    pub proportions: &'static str,
    pub recommended_procedures: Vec<NoseStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nose_box: Option<BoundingBox>,
}

impl NoseAssessment {
    pub fn baseline(nose_box: Option<BoundingBox>) -> Self {
        Self {
            nose_width: "average",
            bridge_shape: "natural",
            tip_definition: "good",
            symmetry: "balanced",
            proportions: "in proportion with the face",
            recommended_procedures: Vec::new(),
            nose_box,
        }
    }

    pub fn recommendations() -> Vec<&'static str> {
        vec![
            "Light smoothing to refine skin texture",
            "Stronger definition of the nasal tip",
            "Better bridge symmetry",
            "Keep the overall look natural",
        ]
    }
}

/* --------------------------------------------------------------------------
Age progression
-------------------------------------------------------------------------- */

pub const DEFAULT_TARGET_AGE: u32 = 40;
pub const DEFAULT_CURRENT_AGE: u32 = 25;

/// Which local age transform applies, with its filter strengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgeBranch {
    /// Target is older: soften, darken, desaturate.
    Aging {
        blur: f32,
        brightness: f32,
        saturation: f32,
        sharpen: f32,
    },
    /// Target is younger: brighten, saturate, crisp up.
    Youth {
        brightness: f32,
        saturation: f32,
        sharpen: f32,
    },
    Unchanged,
}

impl AgeBranch {
    /// Select the branch for moving from `current` to `target` years.
    pub fn select(current: u32, target: u32) -> Self {
        let diff = i64::from(target) - i64::from(current);
        if diff > 0 {
            let k = (diff as f32 / 30.0).min(1.0);
            AgeBranch::Aging {
                blur: 0.5 * k,
                brightness: 1.0 - 0.1 * k,
                saturation: 1.0 - 0.2 * k,
                sharpen: 0.5 + 0.5 * k,
            }
        } else if diff < 0 {
            let k = (diff.unsigned_abs() as f32 / 20.0).min(1.0);
            AgeBranch::Youth {
                brightness: 1.0 + 0.05 * k,
                saturation: 1.0 + 0.1 * k,
                sharpen: 1.0 + 0.5 * k,
            }
        } else {
            AgeBranch::Unchanged
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AgeBranch::Aging { .. } => "aging",
            AgeBranch::Youth { .. } => "youth",
            AgeBranch::Unchanged => "unchanged",
        }
    }
}

/// Prompt bucket for the hosted image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeCategory {
    Young,
    Adult,
    Middle,
    Senior,
}

impl AgeCategory {
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=29 => AgeCategory::Young,
            30..=44 => AgeCategory::Adult,
            45..=64 => AgeCategory::Middle,
            _ => AgeCategory::Senior,
        }
    }
}

/* --------------------------------------------------------------------------
Processing method
-------------------------------------------------------------------------- */

/// How a result image was produced, reported as `processingMethod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProcessingMethod {
    #[serde(rename = "openai_ai")]
    OpenAiAi,
    #[serde(rename = "ai")]
    Ai,
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "local_fallback")]
    LocalFallback,
    #[serde(rename = "nose_beautification_fallback")]
    NoseBeautificationFallback,
    #[serde(rename = "area-specific")]
    AreaSpecific,
    #[serde(rename = "precision-landmarks")]
    PrecisionLandmarks,
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "demo")]
    Demo,
}

impl ProcessingMethod {
    pub fn is_remote(self) -> bool {
        matches!(self, ProcessingMethod::OpenAiAi | ProcessingMethod::Ai)
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
