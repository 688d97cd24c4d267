use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DesignTemplate {
    pub name: &'static str,
    pub description: &'static str,
    /// SVG path data for the picker icon. Never interpreted by this crate.
    pub icon: &'static str,
    pub prompt_fragment: &'static str,
}

pub static DESIGN_TEMPLATES: [DesignTemplate; 4] = [
    DesignTemplate {
        name: "Minimalist & Clean",
        description: "Lots of white space, simple shapes and a calm, restrained palette.",
        icon: "M4 6h16M4 12h16M4 18h16",
        prompt_fragment: "Use a minimalist and clean style: generous negative space, simple geometric shapes, a soft neutral color palette and soft natural lighting. The product should be the single clear focal point.",
    },
    DesignTemplate {
        name: "Bold & Vibrant",
        description: "Saturated colors, strong contrast and energetic composition.",
        icon: "M13 10V3L4 14h7v7l9-11h-7z",
        prompt_fragment: "Use a bold and vibrant style: highly saturated complementary colors, strong contrast, dynamic diagonal composition and energetic abstract shapes that make the product pop.",
    },
    DesignTemplate {
        name: "Elegant & Luxurious",
        description: "Rich textures, dark tones and refined gold accents.",
        icon: "M5 3l3.5 6L12 3l3.5 6L19 3v12H5z",
        prompt_fragment: "Use an elegant and luxurious style: deep rich tones such as black, navy or burgundy, subtle gold or metallic accents, premium materials like marble or silk, and dramatic studio lighting.",
    },
    DesignTemplate {
        name: "Futuristic & Techy",
        description: "Neon glows, dark backgrounds and digital motifs.",
        icon: "M9 3v2M15 3v2M9 19v2M15 19v2M3 9h2M3 15h2M19 9h2M19 15h2M7 7h10v10H7z",
        prompt_fragment: "Use a futuristic and techy style: dark background with neon cyan and magenta glows, holographic surfaces, circuit-like patterns and a sleek high-tech atmosphere.",
    },
];

impl DesignTemplate {
    /// Look a template up by name, ignoring case and surrounding whitespace.
    pub fn find(name: &str) -> Option<&'static DesignTemplate> {
        let needle = name.trim();
        DESIGN_TEMPLATES
            .iter()
            .find(|template| template.name.eq_ignore_ascii_case(needle))
    }

    pub fn default_template() -> &'static DesignTemplate {
        &DESIGN_TEMPLATES[0]
    }
}
