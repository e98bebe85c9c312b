use crate::models::{AspectRatio, ImageSlots, Part, Style};

/// Ordered text and image parts for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedRequest {
    pub parts: Vec<Part>,
}

impl ComposedRequest {
    /// The leading scene description.
    pub fn instruction(&self) -> &str {
        self.parts
            .first()
            .and_then(Part::as_text)
            .unwrap_or_default()
    }

    pub fn image_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| part.as_inline_data().is_some())
            .count()
    }
}

pub struct PromptComposer;

impl PromptComposer {
    /// Builds the instruction text followed by a (label, image) pair for each
    /// populated slot, in person, background, object, accessory order.
    pub fn compose(
        prompt: &str,
        style: Style,
        aspect_ratio: AspectRatio,
        slots: &ImageSlots,
    ) -> ComposedRequest {
        let mut instruction = format!(
            "Generate a high-quality, {} style image. The scene is: \"{}\". The desired aspect ratio is {}.",
            style.name().to_lowercase(),
            prompt,
            aspect_ratio.as_str()
        );

        let mut image_parts = Vec::with_capacity(slots.populated_count() * 2);
        for (role, image) in slots.populated() {
            image_parts.push(Part::text(format!("This is the image for the '{}':", role)));
            image_parts.push(Part::image(image));
        }

        if !image_parts.is_empty() {
            instruction
                .push_str("\n\nPlease incorporate the following image elements into the final composition.");
        }

        let mut parts = Vec::with_capacity(image_parts.len() + 1);
        parts.push(Part::Text(instruction));
        parts.extend(image_parts);

        log::debug!(
            "Composed request with {} part(s), {} image(s)",
            parts.len(),
            slots.populated_count()
        );
        ComposedRequest { parts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EncodedImage, ImageRole};

    fn image(media_type: &str, byte: u8) -> EncodedImage {
        EncodedImage::new(media_type, vec![byte; 4])
    }

    #[test]
    fn test_prompt_only() {
        let composed = PromptComposer::compose(
            "A panda riding a bike",
            Style::Realistic,
            AspectRatio::Square,
            &ImageSlots::new(),
        );

        assert_eq!(composed.parts.len(), 1);
        assert_eq!(composed.image_count(), 0);
        let text = composed.instruction();
        assert!(text.contains("panda riding a bike"));
        assert!(text.contains("realistic"));
        assert!(text.contains("1:1"));
        assert!(!text.contains("incorporate"));
    }

    #[test]
    fn test_prompt_embedded_verbatim() {
        let composed = PromptComposer::compose(
            "  two  spaces  ",
            Style::Realistic,
            AspectRatio::Square,
            &ImageSlots::new(),
        );
        assert!(composed
            .instruction()
            .contains("The scene is: \"  two  spaces  \"."));
    }

    #[test]
    fn test_every_slot_subset_keeps_role_order() {
        for mask in 0u8..16 {
            let mut slots = ImageSlots::new();
            let mut expected = Vec::new();
            for (i, role) in ImageRole::ALL.into_iter().enumerate() {
                if mask & (1 << i) != 0 {
                    slots.set(role, Some(image("image/png", i as u8)));
                    expected.push((role, i as u8));
                }
            }

            let composed =
                PromptComposer::compose("scene", Style::Abstract, AspectRatio::Square, &slots);

            assert_eq!(composed.parts.len(), 1 + expected.len() * 2, "mask {:04b}", mask);
            assert_eq!(composed.image_count(), expected.len());
            assert!(composed.parts[0].as_text().unwrap().contains("scene"));
            assert_eq!(
                composed.instruction().contains("incorporate"),
                !expected.is_empty()
            );
            for (pair, (role, byte)) in composed.parts[1..].chunks(2).zip(&expected) {
                assert_eq!(
                    pair[0].as_text().unwrap(),
                    format!("This is the image for the '{}':", role)
                );
                let decoded = pair[1].as_inline_data().unwrap().decode().unwrap();
                assert_eq!(decoded.bytes, vec![*byte; 4]);
            }
        }
    }

    #[test]
    fn test_single_person_slot() {
        let mut slots = ImageSlots::new();
        slots.set(ImageRole::Person, Some(image("image/jpeg", 7)));

        let composed =
            PromptComposer::compose("", Style::PixelArt, AspectRatio::Portrait, &slots);

        assert_eq!(composed.parts.len(), 3);
        assert!(composed.instruction().contains("pixel art style"));
        assert!(composed.instruction().contains("incorporate"));
        assert_eq!(
            composed.parts[1].as_text(),
            Some("This is the image for the 'person':")
        );
        let data = composed.parts[2].as_inline_data().unwrap();
        assert_eq!(data.mime_type, "image/jpeg");
        assert_eq!(data.decode().unwrap().bytes, vec![7; 4]);
    }

    #[test]
    fn test_labels_precede_images_in_role_order() {
        let mut slots = ImageSlots::new();
        slots.set(ImageRole::Accessory, Some(image("image/png", 4)));
        slots.set(ImageRole::Background, Some(image("image/png", 2)));
        slots.set(ImageRole::Object, Some(image("image/jpeg", 3)));

        let composed =
            PromptComposer::compose("beach day", Style::Cartoon, AspectRatio::Landscape, &slots);

        assert_eq!(composed.parts.len(), 7);
        assert_eq!(composed.image_count(), 3);
        let expected = [(1, "background", 2u8), (3, "object", 3), (5, "accessory", 4)];
        for (index, role, byte) in expected {
            assert_eq!(
                composed.parts[index].as_text().unwrap(),
                format!("This is the image for the '{}':", role)
            );
            let decoded = composed.parts[index + 1]
                .as_inline_data()
                .unwrap()
                .decode()
                .unwrap();
            assert_eq!(decoded.bytes, vec![byte; 4]);
        }
    }

    #[test]
    fn test_all_four_slots() {
        let mut slots = ImageSlots::new();
        for (i, role) in ImageRole::ALL.into_iter().enumerate() {
            slots.set(role, Some(image("image/png", i as u8)));
        }

        let composed =
            PromptComposer::compose("group photo", Style::Fantasy, AspectRatio::Square, &slots);

        assert_eq!(composed.parts.len(), 9);
        assert!(composed.parts[0].as_text().is_some());
        let labels: Vec<_> = composed
            .parts
            .iter()
            .skip(1)
            .step_by(2)
            .map(|part| part.as_text().unwrap().to_string())
            .collect();
        assert_eq!(
            labels,
            ImageRole::ALL
                .iter()
                .map(|role| format!("This is the image for the '{}':", role))
                .collect::<Vec<_>>()
        );
    }
}
