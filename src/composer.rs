use crate::models::{BannerFormat, DesignTemplate, GenerationRequest};

pub const DEFAULT_PRODUCT_URL: &str = "https://www.example.com";

const PROMPT_PREAMBLE: &str = "Create a clean, professional advertising banner image for the product described below. \
The image must not contain any text, letters, words, logos or watermarks; it is a purely visual background that \
text will be placed on later.";

/// The user-supplied half of a prompt.
#[derive(Debug, Clone, Copy)]
pub struct ProductInput<'a> {
    pub description: &'a str,
    pub url: &'a str,
}

/// Assemble the full prompt for one target format.
pub fn compose_prompt(
    input: ProductInput<'_>,
    template: &DesignTemplate,
    format: &BannerFormat,
) -> String {
    format!(
        "{preamble}\n\nProduct description: {description}\nProduct URL: {url}\n\nDesign style: {style}\n\n\
         Compose the image for a {ratio} aspect ratio, suitable for a \"{label}\" ad placement.",
        preamble = PROMPT_PREAMBLE,
        description = input.description,
        url = input.url,
        style = template.prompt_fragment,
        ratio = format.aspect_ratio,
        label = format.name,
    )
}

/// One request per format, in table order.
pub fn compose_requests(
    input: ProductInput<'_>,
    template: &DesignTemplate,
    formats: &[BannerFormat],
) -> Vec<GenerationRequest> {
    formats
        .iter()
        .map(|format| GenerationRequest {
            prompt: compose_prompt(input, template, format),
            aspect_ratio: format.aspect_ratio,
        })
        .collect()
}
