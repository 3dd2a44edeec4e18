//! Prompt composer
//!
//! Maps (brand, category, user text) onto the structured instruction block
//! sent to the image service. The style matrix is an exhaustive match over
//! the brand × category product, so adding a variant to either enum fails to
//! compile until its fragments are written here.

use crate::types::{BrandIdentity, DesignCategory};

/// Fixed style guidance for one brand/category pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleFragments {
    /// Aesthetic and material descriptors
    pub style_context: &'static str,
    /// Garment or asset type
    pub subject_context: &'static str,
    /// Lighting and photographic treatment
    pub visual_vibe: &'static str,
}

/// Look up the style fragments for a pair
pub fn style_for(brand: BrandIdentity, category: DesignCategory) -> StyleFragments {
    use BrandIdentity::*;
    use DesignCategory::*;

    match (brand, category) {
        (Mississippi, Logo) => StyleFragments {
            style_context: "Minimalist luxury logo design, typography-focused, gold foil textures, negative space.",
            subject_context: "Brand identity, monogram, elegant vector-style graphic.",
            visual_vibe: "Clean white background, high-end stationery aesthetic.",
        },
        (Mississippi, Everyday) => StyleFragments {
            style_context: "Sophisticated casual wear, soft flutter sleeves, matte fabrics, muted blush and champagne tones.",
            subject_context: "Lifestyle apparel, wrap tops, soft t-shirts, loungewear.",
            visual_vibe: "Soft natural lighting, lifestyle photography, bright airy studio, botanical accents.",
        },
        (Mississippi, Sportswear) => StyleFragments {
            style_context: "High-performance dancewear, satin finishes, mesh details, lyrical aesthetics, precision cuts.",
            subject_context: "Professional leotards, stage costumes, performance tights.",
            visual_vibe: "Dramatic studio lighting, rim lighting to highlight fabric texture, elegant poses.",
        },
        (OleBrook, Logo) => StyleFragments {
            style_context: "Vintage mascot logo, collegiate block lettering, distressed texture, bold outlines.",
            subject_context: "Sports team mascot, varsity letter, emblem.",
            visual_vibe: "Vector illustration style, sticker aesthetic, bold primary colors.",
        },
        (OleBrook, Everyday) => StyleFragments {
            style_context: "Vintage wash t-shirts, retro screenprint style, comfort colors, fan gear.",
            subject_context: "Spirit wear, hoodies, crew neck sweatshirts, mom-jeans aesthetic.",
            visual_vibe: "Golden hour outdoor lighting, bleacher background, film grain, nostalgic feel.",
        },
        (OleBrook, Sportswear) => StyleFragments {
            style_context: "Modern athletic uniforms, moisture-wicking textures, bold vinyl numbers, aggressive styling.",
            subject_context: "Football jerseys, cheer uniforms, track suits, compression gear.",
            visual_vibe: "High-contrast stadium floodlights, dynamic angles, sharp focus, energetic atmosphere.",
        },
    }
}

/// Compose the structured prompt for one submission
///
/// Sections appear in a fixed order: task, category, design DNA, visual
/// presentation, subject matter, then the user's request verbatim.
pub fn compose(brand: BrandIdentity, category: DesignCategory, user_text: &str) -> String {
    let style = style_for(brand, category);

    format!(
        "Task: Create a photorealistic design or illustration for {brand}.\n\
         Category: {category}\n\
         \n\
         Design DNA:\n\
         {style_context}\n\
         \n\
         Visual Presentation:\n\
         {visual_vibe}\n\
         \n\
         Subject Matter:\n\
         {subject_context}\n\
         \n\
         Specific User Request:\n\
         {user_text}",
        brand = brand.display_name(),
        category = category.as_str(),
        style_context = style.style_context,
        visual_vibe = style.visual_vibe,
        subject_context = style.subject_context,
        user_text = user_text,
    )
}

/// Suggested prompts offered under the prompt box
pub fn presets(brand: BrandIdentity, category: DesignCategory) -> [&'static str; 3] {
    use BrandIdentity::*;
    use DesignCategory::*;

    match (brand, category) {
        (Mississippi, Logo) => [
            "Minimalist gold monogram",
            "Elegant script watermark",
            "Abstract swan icon",
        ],
        (Mississippi, Everyday) => [
            "Soft cotton wrap top",
            "Studio-to-street hoodie",
            "Balletcore cardigan",
        ],
        (Mississippi, Sportswear) => [
            "Performance lyrical dress",
            "Competition leotard with mesh",
            "Professional rehearsal tutu",
        ],
        (OleBrook, Logo) => [
            "Bold Bulldog mascot head",
            "Varsity block letter 'OB'",
            "Retro badge emblem",
        ],
        (OleBrook, Everyday) => [
            "Vintage wash fan tee",
            "Cozy spirit sweatshirt",
            "Mom-cut denim jacket with patch",
        ],
        (OleBrook, Sportswear) => [
            "Game day cheer shell",
            "Football practice jersey",
            "Track warmup suit",
        ],
    }
}
