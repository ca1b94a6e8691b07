//! Integration tests for the builder lifecycle
//!
//! These follow a plugin through a whole request: construct the builder,
//! declare modules, let the host initialize, then answer the host's category,
//! restriction and render callbacks.

#[cfg(test)]
mod integration_tests {
    use std::sync::{Arc, Mutex};

    use crate::core::block::RENDER_CALLBACK;
    use crate::prelude::*;
    use crate::runtime::host::{HostError, FIELD_GROUP_CAPABILITY};
    use serde_json::json;

    fn declare_site(builder: &mut Builder) {
        let hero = builder.add_module("Hero Banner", "layout");
        hero.add_text("heading", "Heading", TextSettings::default())
            .mark_required()
            .set_placeholder("Enter heading");
        hero.add_image("background", "Background", ImageSettings::default());

        let faq = builder.add_module("FAQ", "content");
        let questions = faq.add_repeater("questions", "Questions");
        questions.add_text("question", "Question", TextSettings::default());
        questions.add_richtext("answer", "Answer", RichTextSettings::default());

        builder.add_module("Footer", "layout");
    }

    /// Full lifecycle against the recording host
    #[test]
    fn test_full_lifecycle() {
        let mut host = MemoryHost::new();
        let mut builder = Builder::new(&host, BuilderOptions::default()).unwrap();
        declare_site(&mut builder);

        let slugs: Vec<&str> = builder.categories().iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["layout", "content"]);

        let registry = builder.finalize(&mut host).unwrap();

        let blocks: Vec<&str> = host.blocks().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(blocks, vec!["group_hero-banner", "group_faq", "group_footer"]);
        assert_eq!(host.field_groups().len(), 3);
        assert!(host.blocks().iter().all(|b| b.render_callback == RENDER_CALLBACK));
        assert_eq!(registry.modules().len(), 3);

        let faq = &host.field_groups()[1];
        let questions = &faq.fields[0];
        assert_eq!(questions.kind, "repeater");
        assert_eq!(questions.sub_fields.as_ref().map(Vec::len), Some(2));
    }

    /// The registry answers the host's category hooks
    #[test]
    fn test_category_hooks() {
        let mut host = MemoryHost::new();
        let mut builder = Builder::new(&host, BuilderOptions::default()).unwrap();
        declare_site(&mut builder);
        let registry = builder.finalize(&mut host).unwrap();

        let host_categories = vec![
            Category {
                slug: "text".to_string(),
                title: "Text".to_string(),
                icon: None,
            },
            Category {
                slug: "layout".to_string(),
                title: "Layout Elements".to_string(),
                icon: None,
            },
        ];
        let post = json!({ "ID": 7, "post_type": "page" });
        let merged = registry.merge_block_categories(host_categories, &post);
        let slugs: Vec<&str> = merged.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["text", "layout", "layout", "content"]);

        let allowed = registry.restrict_block_types(vec!["core/paragraph".to_string()]);
        assert_eq!(
            allowed,
            vec!["acf/group_hero-banner", "acf/group_faq", "acf/group_footer"]
        );
    }

    /// Restriction policy is the same before and after finalization
    #[test]
    fn test_restriction_matches_before_and_after_finalize() {
        let mut host = MemoryHost::new();
        let mut builder = Builder::new(&host, BuilderOptions::default()).unwrap();
        builder.add_module("A", "one");
        builder.add_module("B", "two");

        let before = builder.restrict_block_types(Vec::new());
        let registry = builder.finalize(&mut host).unwrap();
        assert_eq!(before, vec!["acf/group_a", "acf/group_b"]);
        assert_eq!(registry.restrict_block_types(Vec::new()), before);
    }

    /// A missing host capability stops construction with a readable message
    #[test]
    fn test_missing_host_capability() {
        let host = MemoryHost::without_capability(FIELD_GROUP_CAPABILITY);
        match Builder::new(&host, BuilderOptions::default()) {
            Err(BuilderError::MissingHostCapability { capability }) => {
                assert_eq!(capability, FIELD_GROUP_CAPABILITY);
            }
            other => panic!("expected a missing capability error, got {:?}", other),
        }
        assert!(host.blocks().is_empty());
        assert!(host.field_groups().is_empty());
    }

    /// A host rejection stops finalization and is returned unchanged
    #[test]
    fn test_host_rejection_propagates() {
        let mut host = MemoryHost::new();
        host.reject_block("group_faq");
        let mut builder = Builder::new(&host, BuilderOptions::default()).unwrap();
        declare_site(&mut builder);

        let err = builder.finalize(&mut host).unwrap_err();
        match err {
            BuilderError::Host(HostError::BlockRejected { name, .. }) => assert_eq!(name, "group_faq"),
            other => panic!("expected a host error, got {:?}", other),
        }
        assert_eq!(host.blocks().len(), 1);
        assert_eq!(host.field_groups().len(), 1);
    }

    /// Block renders reach subscribed renderers with their raw field data
    #[test]
    fn test_render_dispatch() {
        let mut host = MemoryHost::new();
        let mut builder = Builder::new(&host, BuilderOptions::default()).unwrap();
        declare_site(&mut builder);
        let mut registry = builder.finalize(&mut host).unwrap();

        let rendered = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&rendered);
        registry.on_render(move |instance| {
            if let Ok(mut seen) = sink.lock() {
                seen.push((instance.name.clone(), instance.data.get("heading").cloned()));
            }
        });

        let instance: BlockInstance = serde_json::from_value(json!({
            "name": "acf/group_hero-banner",
            "data": { "heading": "Welcome" },
        }))
        .unwrap();
        registry.render_block(&instance);

        let seen = rendered.lock().unwrap();
        assert_eq!(
            *seen,
            vec![("acf/group_hero-banner".to_string(), Some(json!("Welcome")))]
        );
    }

    /// The recorded host document matches the expected wire shape
    #[test]
    fn test_recorded_document() {
        let mut host = MemoryHost::new();
        let mut builder = Builder::new(
            &host,
            BuilderOptions::from_json(r#"{"restrict_block_categories": false}"#).unwrap(),
        )
        .unwrap();
        builder
            .add_module("Quote", "content")
            .add_textarea("text", "Text", TextAreaSettings::default())
            .mark_required();
        let registry = builder.finalize(&mut host).unwrap();

        assert_eq!(
            host.to_json(),
            json!({
                "blocks": [{
                    "name": "group_quote",
                    "title": "Quote",
                    "render_callback": RENDER_CALLBACK,
                    "category": "content",
                    "mode": "edit",
                }],
                "field_groups": [{
                    "key": "group_quote",
                    "title": "Quote",
                    "location": [[{ "param": "block", "operator": "==", "value": "acf/group_quote" }]],
                    "fields": [{
                        "key": "field_text",
                        "name": "text",
                        "label": "Text",
                        "type": "textarea",
                        "required": 1,
                    }],
                }],
            })
        );
        let host_default = vec!["core/quote".to_string()];
        assert_eq!(registry.restrict_block_types(host_default.clone()), host_default);
    }
}
