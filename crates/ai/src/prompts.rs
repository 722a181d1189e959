//! Prompt construction for the hosted models.
//!
//! Pure string builders so they can be tested without a network.

use medvision_core::effects::{AgeCategory, FaceEffect, Procedure};
use medvision_core::makeup::MakeupType;

pub const SURGICAL_SYSTEM: &str = "You are a medical visualization AI that creates realistic before/after surgical previews. \
Provide detailed instructions for image editing that would show realistic surgical outcomes. \
Always maintain medical accuracy and realistic expectations.";

pub const MAKEUP_SYSTEM: &str =
    "You are a professional makeup artist AI that applies virtual makeup to photos realistically.";

pub const ANALYSIS_REQUEST: &str = "Analyze this medical/portrait photo for surgical planning. Identify:\n\
- Facial features and proportions\n\
- Areas suitable for enhancement\n\
- Skin condition and texture\n\
- Recommended procedures\n\n\
Return as JSON:\n\
{\"faceShape\": \"description\", \"skinCondition\": \"analysis\", \"suitableProcedures\": [\"list\"], \"recommendations\": \"professional advice\"}";

/// Describe an intensity as a strength word: above 60 is strong, below 40 mild.
fn strength(intensity: u8, strong: &'static str, mild: &'static str, moderate: &'static str) -> &'static str {
    if intensity > 60 {
        strong
    } else if intensity < 40 {
        mild
    } else {
        moderate
    }
}

/* --------------------------------------------------------------------------
Surgical visualization
-------------------------------------------------------------------------- */

pub fn surgical_instructions(procedure: &Procedure, intensity: u8) -> String {
    match procedure {
        Procedure::Rhinoplasty | Procedure::NoseSurgery => format!(
            "Create a realistic rhinoplasty visualization showing subtle nose reshaping. \
             Make the nose {}. Focus on: bridge smoothing, tip refinement, nostril adjustment. \
             Keep the result natural and medically realistic.",
            strength(intensity, "more refined and smaller", "slightly refined", "naturally refined")
        ),
        Procedure::Dental => format!(
            "Generate a dental restoration visualization showing improved teeth. \
             Apply {} improvements including teeth straightening and alignment, natural whitening \
             (not artificially white), gap closure if present and proportional sizing. \
             Keep teeth looking natural and healthy.",
            strength(intensity, "significant", "mild", "moderate")
        ),
        Procedure::Facelift => format!(
            "Create a facelift visualization with {} improvements: skin tightening around the jawline, \
             reduction of jowls, smoothing of nasolabial folds, natural facial contouring. \
             Maintain the person's natural features and expressions.",
            if intensity > 60 { "significant" } else { "subtle" }
        ),
        Procedure::ScarRemoval => "Generate a scar removal/reduction visualization showing diminished scar \
             visibility, improved skin texture, natural skin tone matching and realistic healing results. \
             Keep the improvement realistic and medically accurate."
            .to_string(),
        Procedure::General(name) => format!(
            "Create a realistic visualization of a {name} procedure with {} improvements. \
             Keep the result natural and medically realistic.",
            strength(intensity, "significant", "mild", "moderate")
        ),
    }
}

/// User message for the chat model: instructions plus the JSON answer shape.
pub fn surgical_request(procedure: &Procedure, intensity: u8) -> String {
    format!(
        "{}\n\nGenerate a detailed description of how this image should be modified to show realistic {} results. \
         Focus on specific anatomical changes that would occur with intensity level {intensity}/100.\n\n\
         Return your response as a JSON object with these fields:\n\
         {{\"modifications\": \"detailed description of changes\", \"dallePrompt\": \"DALL-E prompt for generating the after image\", \"medicalNotes\": \"realistic expectations and notes\"}}",
        surgical_instructions(procedure, intensity),
        procedure.as_str()
    )
}

pub fn surgical_image_prompt(refined: &str) -> String {
    format!(
        "Medical visualization: {refined} Professional medical photography style, high quality, \
         realistic lighting, clinical accuracy, natural appearance"
    )
}

/* --------------------------------------------------------------------------
Makeup
-------------------------------------------------------------------------- */

pub fn makeup_instructions(kind: MakeupType, color: &str, intensity: u8) -> String {
    match kind {
        MakeupType::Lipstick => format!(
            "Apply {color} lipstick with {intensity}% intensity. Make lips look naturally enhanced with \
             the specified color. Ensure proper lip line definition and natural shine."
        ),
        MakeupType::Eyeshadow => format!(
            "Apply {color} eyeshadow with {intensity}% intensity. Blend naturally across the eyelid, \
             complement the eye shape. Use professional makeup application techniques."
        ),
        MakeupType::Blush => format!(
            "Apply {color} blush with {intensity}% intensity. Place on cheek apples and blend toward \
             temples. Create a natural, healthy glow."
        ),
        MakeupType::Foundation => format!(
            "Apply {color} foundation with {intensity}% coverage. Even out skin tone naturally, reduce \
             blemishes subtly. Maintain skin texture and natural appearance."
        ),
        MakeupType::Eyeliner => format!(
            "Apply {color} eyeliner with {intensity}% intensity. Define the eye shape naturally, enhance \
             lash line. Keep application clean and professional."
        ),
        MakeupType::Mascara => format!(
            "Apply {color} mascara with {intensity}% intensity. Enhance lashes with length and volume \
             naturally. Avoid clumping, maintain realistic appearance."
        ),
        MakeupType::Basic => format!(
            "Apply {color} makeup with {intensity}% intensity. Keep the application natural and realistic."
        ),
    }
}

pub fn makeup_request(kind: MakeupType, color: &str, intensity: u8) -> String {
    format!(
        "Apply virtual makeup to this photo: {}\n\n\
         Generate a detailed description for DALL-E to apply this makeup effect.\n\
         Return as JSON:\n\
         {{\"dallePrompt\": \"detailed DALL-E prompt for makeup application\", \"makeupNotes\": \"professional makeup application notes\"}}",
        makeup_instructions(kind, color, intensity)
    )
}

pub fn makeup_image_prompt(refined: &str) -> String {
    format!(
        "Professional makeup photography: {refined} High-quality beauty photography, natural lighting, \
         realistic makeup application, maintain facial features and expression"
    )
}

/* --------------------------------------------------------------------------
Age progression
-------------------------------------------------------------------------- */

fn age_traits(category: AgeCategory) -> &'static str {
    match category {
        AgeCategory::Young => "youth, smooth skin, bright eyes, full hair, vibrant appearance",
        AgeCategory::Adult => "mature features, slight wrinkles, natural aging, professional appearance",
        AgeCategory::Middle => "middle-aged, defined lines, graying hair, dignified appearance",
        AgeCategory::Senior => "elderly, deep wrinkles, gray/white hair, age spots, wise appearance",
    }
}

pub fn age_prompt(target_age: u32) -> String {
    format!(
        "Age progression to {target_age} years old: person with {}. Realistic aging effects, maintain \
         facial structure and identity, natural progression, high-quality portrait photography",
        age_traits(AgeCategory::for_age(target_age))
    )
}

/* --------------------------------------------------------------------------
Face effects
-------------------------------------------------------------------------- */

pub fn face_effect_prompt(effect: &FaceEffect, intensity: u8) -> String {
    let i = intensity;
    match effect {
        FaceEffect::Young => format!(
            "Make the person look younger by {i}%, smooth skin, reduce wrinkles, brighter eyes, youthful appearance"
        ),
        FaceEffect::Old => format!("Age the person by {i}%, add appropriate wrinkles, gray hair, mature features"),
        FaceEffect::Male => format!(
            "Transform to masculine appearance with {i}% intensity, stronger jawline, facial hair, masculine features"
        ),
        FaceEffect::Female => format!(
            "Transform to feminine appearance with {i}% intensity, softer features, feminine makeup, delicate appearance"
        ),
        FaceEffect::Smile => format!("Add a natural smile with {i}% intensity, happy expression, bright eyes"),
        FaceEffect::Laugh => format!("Add a wide laugh with {i}% intensity, joyful expression, laughing eyes"),
        FaceEffect::Beauty => format!(
            "Apply beauty enhancement with {i}% intensity, smooth skin, enhanced features, natural glow"
        ),
        FaceEffect::Makeup => format!(
            "Apply natural makeup with {i}% intensity, enhanced eyes, defined lips, smooth complexion"
        ),
        FaceEffect::HairColor => format!(
            "Change hair color with {i}% intensity, natural hair coloring, maintain hair texture"
        ),
        FaceEffect::Beard => format!(
            "Add facial hair/beard with {i}% intensity, natural beard growth, masculine appearance"
        ),
        FaceEffect::EyeColor => format!(
            "Change eye color with {i}% intensity, natural eye coloring, maintain eye shape"
        ),
        FaceEffect::EyeSize => format!(
            "Enhance eye size with {i}% intensity, larger eyes, maintain natural proportions"
        ),
        FaceEffect::Glow => format!(
            "Add natural skin glow with {i}% intensity, healthy radiant skin, soft lighting effect"
        ),
        FaceEffect::Smooth => format!(
            "Smooth skin texture with {i}% intensity, reduce blemishes, maintain natural appearance"
        ),
        FaceEffect::Other(name) => format!(
            "Apply {name} effect with {i}% intensity to the face, maintain natural and realistic appearance"
        ),
    }
}
