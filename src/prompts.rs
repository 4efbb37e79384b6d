use crate::models::GenerationRequest;

pub const FURNITURE_IMAGE: &str = include_str!("../data/prompts/furniture_image.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the image prompt for a furniture request.
///
/// The description is embedded verbatim; the template carries the fixed
/// style constraints (photorealism, industrial materials, loft setting).
pub fn build_furniture_prompt(request: &GenerationRequest) -> String {
    render(
        FURNITURE_IMAGE,
        &[
            ("furniture_type", request.furniture_type.display_name()),
            ("description", &request.description),
        ],
    )
}
