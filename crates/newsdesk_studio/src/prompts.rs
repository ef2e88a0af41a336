//! Instruction texts and response schemas for every generation call.

use newsdesk_core::NewsTopic;
use serde_json::{Value, json};

/// News anchor description used when no other is configured.
pub const DEFAULT_BASE_ANCHOR_PROMPT: &str = "A professional news anchor in a tailored navy suit, \
     seated at a sleek modern news desk and looking directly at the camera, photorealistic, \
     broadcast studio lighting";

/// Background substituted when an anchor shot is refused.
pub const FALLBACK_BACKGROUND: &str = "a generic news studio.";

/// Appended to the reported prompt when the widescreen anchor used the fallback.
pub const FALLBACK_NOTE: &str = " (Fallback to generic background due to content policy)";

/// Square post fallback for roundups.
pub const MULTI_POST_FALLBACK: &str = "An abstract graphic design with news-related symbols and bold \
     text saying 'News Update'. 1:1 aspect ratio, clean, modern.";

// ---------------------------------------------------------------------------
// Image prompts
// ---------------------------------------------------------------------------

pub fn anchor_landscape(base: &str, background: &str) -> String {
    format!("{base}, with a background of {background}")
}

pub fn anchor_portrait(base: &str, background: &str) -> String {
    format!("Medium close-up shot of {base}, with a background of {background}")
}

pub fn single_post(description: &str) -> String {
    format!(
        "A high-quality, photorealistic image representing: {description}. Clean, professional, editorial style."
    )
}

pub fn multi_post(description: &str) -> String {
    format!(
        "A high-quality, photorealistic image for a social media post about: {description}. \
         Clean, professional, editorial style, with eye-catching text integrated into the image. \
         1:1 aspect ratio."
    )
}

pub fn thumbnail_fallback(first_description: Option<&str>) -> String {
    let theme = first_description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("news stories");
    format!(
        "A professional and eye-catching YouTube thumbnail for a news roundup. The main theme is \
         '{theme}'. Feature bold text saying 'Breaking News'. Graphic design, high contrast."
    )
}

pub fn b_roll(prompt: &str) -> String {
    format!("{prompt}. Photorealistic, cinematic, 16:9 aspect ratio.")
}

// ---------------------------------------------------------------------------
// Single story
// ---------------------------------------------------------------------------

const SINGLE_FIELDS: &str = r#"The JSON object must contain these top-level properties:
1. "script": A 3-4 sentence news summary written for a news anchor. Report the news directly and do NOT mention the source.
2. "topic": The single most relevant topic from this list: {topics}.
3. "backgroundDescription": A short, vivid description of a background image behind the news anchor. It must be safe for work and must NOT describe people, graphic events or violence. Focus on locations, objects or abstract concepts.
4. "postImageDescription": A detailed prompt for an AI image generator to create an eye-catching 1:1 social media image about the story. It MUST include a short, high-impact text phrase (such as 'BREAKING NEWS' or 'MAJOR UPDATE') rendered visibly on the image.
5. "socialMediaContent": An object with "youtube" {"title", "description", "keywords" (array of strings), "hashtags" (array of strings)}, "facebook" {"post"} and "instagram" {"post"}.
6. "videoImagePrompts": An array of 3-4 detailed, photorealistic image prompts for 16:9 video B-roll describing scenes, objects or abstract concepts related to the story. Do NOT include people or text.
7. "storyVideoPrompts": An array of 1-2 cinematic text-to-video prompts based on the script, describing action, camera movement and mood."#;

const RAW_JSON_RULES: &str = "Your entire response MUST be a single, raw, valid JSON object. \
     Do NOT include any text, conversation or markdown code fences outside of the JSON object.";

const SINGLE_EXAMPLE: &str = r##"Example of a correctly formatted response:
{
  "script": "The city council approved a forty-acre park on the former rail yard, with construction set to begin next spring.",
  "topic": "politics",
  "backgroundDescription": "A wide green park with young trees and walking paths beside an old rail bridge at golden hour.",
  "postImageDescription": "A bright aerial view of a new city park with the bold text 'NEW PARK APPROVED!' across the top.",
  "socialMediaContent": {
    "youtube": {
      "title": "Rail Yard Becomes a Park",
      "description": "The council has approved a new park on the old rail yard. Here is what it means for the neighborhood.",
      "keywords": ["city park", "rail yard", "city council"],
      "hashtags": ["#CityNews", "#Parks"]
    },
    "facebook": {"post": "Big news for the east side: the old rail yard is becoming a forty-acre park! #CityNews"},
    "instagram": {"post": "From rail yard to green space. Construction starts next spring. #Parks #CityNews"}
  },
  "videoImagePrompts": [
    "Aerial drone view over an abandoned rail yard at sunrise.",
    "Architectural rendering of tree-lined walking paths in a modern urban park."
  ],
  "storyVideoPrompts": [
    "Slow drone push-in over a rusting rail yard that dissolves into a lush park, warm morning light."
  ]
}"##;

fn single_fields() -> String {
    SINGLE_FIELDS.replace("{topics}", &NewsTopic::prompt_list())
}

/// Instructions for the URL path. The response is free text expected to
/// contain one JSON object.
pub fn url_prompt(url: &str, has_image: bool) -> String {
    let mut prompt = format!(
        "Analyze the news article at the URL \"{url}\". Based on the article, generate a response in the JSON format described below.\n\n"
    );
    if has_image {
        prompt.push_str(
            "An image has also been provided. Use it as the PRIMARY visual context: the \
             'backgroundDescription' and 'postImageDescription' MUST be derived from this image \
             while remaining relevant to the article.\n\n",
        );
    }
    prompt.push_str(&single_fields());
    prompt.push_str("\n\nCRITICAL INSTRUCTIONS:\n");
    prompt.push_str(RAW_JSON_RULES);
    prompt.push_str("\n\n");
    prompt.push_str(SINGLE_EXAMPLE);
    prompt
}

/// Instructions for the headline path, answered under [`single_story_schema`].
pub fn headline_prompt(headline: &str, language: Option<&str>, has_image: bool) -> String {
    let mut prompt = String::from(
        "You are a creative news content generator. You will be given a news headline, and \
         optionally an image. Expand the headline into a full news segment.\n\n",
    );
    if has_image {
        prompt.push_str(
            "An image has been provided and is the primary source of visual context; the headline \
             adds context. The 'backgroundDescription' and 'postImageDescription' MUST be based on \
             the image, and the 'script' should creatively connect the headline to the image.\n\n",
        );
    }
    match language {
        Some(language) => prompt.push_str(&format!(
            "The headline is written in {language}. Translate it to English first."
        )),
        None => prompt.push_str("If the headline is not in English, translate it to English first."),
    }
    prompt.push_str(
        " Then use the English headline (and the image, if provided) to generate the content, \
         adhering strictly to the provided JSON schema.\n\n",
    );
    prompt.push_str(&single_fields());
    prompt.push_str(&format!("\n\nThe user-provided headline is: \"{headline}\""));
    prompt
}

fn social_media_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "youtube": {
                "type": "OBJECT",
                "properties": {
                    "title": {"type": "STRING"},
                    "description": {"type": "STRING"},
                    "keywords": {"type": "ARRAY", "items": {"type": "STRING"}},
                    "hashtags": {"type": "ARRAY", "items": {"type": "STRING"}}
                },
                "required": ["title", "description", "keywords", "hashtags"]
            },
            "facebook": {
                "type": "OBJECT",
                "properties": {"post": {"type": "STRING"}},
                "required": ["post"]
            },
            "instagram": {
                "type": "OBJECT",
                "properties": {"post": {"type": "STRING"}},
                "required": ["post"]
            }
        },
        "required": ["youtube", "facebook", "instagram"]
    })
}

/// Response schema of the single-story call.
pub fn single_story_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "script": {
                "type": "STRING",
                "description": "A 3-4 sentence news summary written for a news anchor."
            },
            "topic": {
                "type": "STRING",
                "description": format!("The single most relevant topic from this list: {}.", NewsTopic::prompt_list())
            },
            "backgroundDescription": {
                "type": "STRING",
                "description": "A short, vivid, safe-for-work background description with no people, graphic events or violence."
            },
            "postImageDescription": {
                "type": "STRING",
                "description": "A detailed 1:1 social image prompt that includes a short, high-impact text phrase rendered on the image."
            },
            "socialMediaContent": social_media_schema(),
            "videoImagePrompts": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "3-4 photorealistic 16:9 B-roll image prompts without people or text."
            },
            "storyVideoPrompts": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "1-2 cinematic text-to-video prompts describing action, camera movement and mood."
            }
        },
        "required": [
            "script", "topic", "backgroundDescription", "postImageDescription",
            "socialMediaContent", "videoImagePrompts", "storyVideoPrompts"
        ]
    })
}

// ---------------------------------------------------------------------------
// Multi story
// ---------------------------------------------------------------------------

fn story_count_word(count: usize) -> &'static str {
    match count {
        2 => "two",
        3 => "three",
        _ => "several",
    }
}

/// Instructions for the roundup call.
pub fn multi_story_prompt(headlines: &[&str], has_images: bool, translation_language: &str) -> String {
    let mut prompt = format!(
        "You are an expert news producer creating a content package for a YouTube video covering {} stories.\nThe headlines are:\n",
        story_count_word(headlines.len())
    );
    for (index, headline) in headlines.iter().enumerate() {
        prompt.push_str(&format!("{}. \"{headline}\"\n", index + 1));
    }
    if has_images {
        prompt.push_str(
            "\nImages have been provided for one or more headlines. Use them as the primary visual \
             inspiration. The 'thumbnailPrompt' should describe a single, compelling scene or \
             collage that creatively incorporates elements from the provided images.\n",
        );
    }
    prompt.push_str(&format!(
        "\nTranslate any non-English headlines to English before processing. Your entire response \
         MUST be a single, raw, valid JSON object that strictly follows the provided schema. The \
         'postImageDescriptions' and 'storyVideoPrompts' arrays MUST each have exactly {} items, one \
         per headline, in headline order. You must provide a complete {translation_language} \
         translation of the main script in 'translatedScript'.",
        headlines.len()
    ));
    prompt
}

/// Response schema of the roundup call.
pub fn multi_story_schema(story_count: usize, translation_language: &str) -> Value {
    let stories = story_count_word(story_count);
    json!({
        "type": "OBJECT",
        "properties": {
            "introScript": {
                "type": "STRING",
                "description": "A short, engaging 15-20 second introduction that hooks the viewer by teasing every story."
            },
            "mainScript": {
                "type": "STRING",
                "description": format!("A detailed, long-form news script covering each of the {stories} stories in depth, with clear separators.")
            },
            "translatedScript": {
                "type": "STRING",
                "description": format!("A complete and accurate {translation_language} translation of the entire 'mainScript'.")
            },
            "thumbnailPrompt": {
                "type": "STRING",
                "description": format!("A detailed prompt for an eye-catching 16:9 YouTube thumbnail. It MUST include a short, high-impact text phrase (like 'WORLD SHOCKED!' or '{story_count} HUGE STORIES') rendered on the thumbnail. If images were provided, describe a scene that creatively combines them.")
            },
            "postImageDescriptions": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": format!("Exactly {story_count} short (5-7 words) descriptions, one per story, each for a photorealistic square social image with a short catchy text phrase.")
            },
            "socialMediaContent": social_media_schema(),
            "videoImagePrompts": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "5-6 photorealistic 16:9 B-roll image prompts about the stories, without people or text."
            },
            "introVideoPrompt": {
                "type": "STRING",
                "description": "One dynamic, cinematic text-to-video prompt for the intro, such as a fast-paced montage or dramatic zoom."
            },
            "storyVideoPrompts": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": format!("Exactly {story_count} cinematic text-to-video prompts, one per story in the main script, describing action and mood.")
            }
        },
        "required": [
            "introScript", "mainScript", "translatedScript", "thumbnailPrompt",
            "postImageDescriptions", "socialMediaContent", "videoImagePrompts",
            "introVideoPrompt", "storyVideoPrompts"
        ]
    })
}

// ---------------------------------------------------------------------------
// Paragraph prompts
// ---------------------------------------------------------------------------

pub fn paragraph_prompt(script: &str) -> String {
    format!(
        "You are a video production assistant. Break the news script below into logical paragraphs \
         and write a cinematic text-to-video prompt for each paragraph.\n\n\
         The script is:\n---\n{script}\n---\n\n\
         For each paragraph, write a detailed, engaging text-to-video prompt that visually represents \
         its content. Describe camera movement, angles, lighting and mood, in a form suitable for a \
         modern text-to-video generator.\n\n\
         Return a JSON object that follows the provided schema. The 'prompts' array holds one object \
         per paragraph, each with the 'paragraph' text and its 'prompt'."
    )
}

pub fn paragraph_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "prompts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "paragraph": {"type": "STRING", "description": "A paragraph from the original script."},
                        "prompt": {"type": "STRING", "description": "A detailed, cinematic text-to-video prompt for the paragraph."}
                    },
                    "required": ["paragraph", "prompt"]
                }
            }
        },
        "required": ["prompts"]
    })
}
