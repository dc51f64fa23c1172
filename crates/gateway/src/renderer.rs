//! Maps answer segments to display units.

use clinic_core::types::{AnswerSegment, LinkKind, RenderedMessage, RenderedUnit};

/// Render a structured answer, preserving segment order.
pub fn render(segments: &[AnswerSegment]) -> RenderedMessage {
    RenderedMessage::new(segments.iter().map(render_segment).collect())
}

fn render_segment(segment: &AnswerSegment) -> RenderedUnit {
    match segment {
        AnswerSegment::Text { value } => RenderedUnit::Text {
            value: value.clone(),
        },
        AnswerSegment::Break => RenderedUnit::LineBreak,
        AnswerSegment::Link { text, href } => RenderedUnit::Anchor {
            text: text.clone(),
            href: href.clone(),
            kind: LinkKind::classify(href),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::clinic_catalog;

    #[test]
    fn test_render_preserves_order_and_content() {
        let segments = vec![
            AnswerSegment::text("Havířov: "),
            AnswerSegment::link("+420 773 595 504", "tel:+420773595504"),
            AnswerSegment::Break,
            AnswerSegment::link("Mapa", "kontakt.html#mapa"),
        ];

        let rendered = render(&segments);
        assert_eq!(
            rendered.units,
            vec![
                RenderedUnit::Text { value: "Havířov: ".into() },
                RenderedUnit::Anchor {
                    text: "+420 773 595 504".into(),
                    href: "tel:+420773595504".into(),
                    kind: LinkKind::Telephone,
                },
                RenderedUnit::LineBreak,
                RenderedUnit::Anchor {
                    text: "Mapa".into(),
                    href: "kontakt.html#mapa".into(),
                    kind: LinkKind::Page,
                },
            ]
        );
    }

    #[test]
    fn test_render_every_builtin_answer() {
        let catalog = clinic_catalog().unwrap();
        for intent in catalog.intents() {
            let rendered = render(&intent.answer);
            assert_eq!(rendered.units.len(), intent.answer.len());
            for (segment, unit) in intent.answer.iter().zip(&rendered.units) {
                match (segment, unit) {
                    (AnswerSegment::Text { value }, RenderedUnit::Text { value: out }) => {
                        assert_eq!(value, out)
                    }
                    (AnswerSegment::Break, RenderedUnit::LineBreak) => {}
                    (
                        AnswerSegment::Link { text, href },
                        RenderedUnit::Anchor { text: t, href: h, .. },
                    ) => {
                        assert_eq!(text, t);
                        assert_eq!(href, h);
                    }
                    other => panic!("variant mismatch in {}: {:?}", intent.id, other),
                }
            }
        }
    }

    #[test]
    fn test_render_empty() {
        assert!(render(&[]).is_empty());
    }
}
