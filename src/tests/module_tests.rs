//! Tests for modules and the records they produce
//!
//! A module renders into a block record and a field group record. These tests
//! pin down the exact shape of both, since the host matches field names and
//! nesting literally.

#[cfg(test)]
mod module_tests {
    use crate::prelude::*;
    use serde_json::json;

    /// A fresh module renders an empty field group bound to its block
    #[test]
    fn test_empty_module_field_group() {
        let mut host = MemoryHost::new();
        let mut builder = Builder::new(&host, BuilderOptions::default()).unwrap();
        let module = builder.add_module("Hero Banner", "layout");

        let record = module.field_group_record();
        assert_eq!(record.key, "group_hero-banner");
        assert!(record.fields.is_empty());
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "key": "group_hero-banner",
                "title": "Hero Banner",
                "location": [[{ "param": "block", "operator": "==", "value": "acf/group_hero-banner" }]],
                "fields": [],
            })
        );

        let registry = builder.finalize(&mut host).unwrap();
        assert_eq!(registry.field_groups().next(), Some(&record));
    }

    /// The block record names the module key and its category
    #[test]
    fn test_block_record() {
        let mut module = Module::new("Call To Action", "marketing");
        module.set_mode(BlockMode::Auto);

        let block = module.block_record();
        assert_eq!(block.name, "group_call-to-action");
        assert_eq!(block.title, "Call To Action");
        assert_eq!(block.category, "marketing");
        assert_eq!(block.mode, BlockMode::Auto);
        assert_eq!(block.render_callback, crate::core::block::RENDER_CALLBACK);
    }

    /// Fields keep insertion order, repeaters render their sub fields in place
    #[test]
    fn test_fields_in_insertion_order() {
        let mut module = Module::new("Team", "content");
        module.add_text("heading", "Heading", TextSettings::default());
        {
            let members = module.add_repeater("members", "Members");
            members.add_text("name", "Name", TextSettings::default());
            members.add_image("portrait", "Portrait", ImageSettings::default());
        }
        module.add_url("more", "More link");

        let record = module.field_group_record();
        let keys: Vec<&str> = record.fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["field_heading", "field_members", "field_more"]);

        let sub_keys: Vec<&str> = record.fields[1]
            .sub_fields
            .as_ref()
            .unwrap()
            .iter()
            .map(|f| f.key.as_str())
            .collect();
        assert_eq!(sub_keys, vec!["field_name", "field_portrait"]);
    }

    /// Repeaters take the shared mutators too
    #[test]
    fn test_repeater_conditions() {
        let mut module = Module::new("Gallery", "media");
        module.add_boolean("show_slides", "Show slides", "");
        module
            .add_repeater("slides", "Slides")
            .set_condition("show_slides", 1)
            .set_instructions("Up to five slides")
            .with_settings(RepeaterSettings {
                max: Some(5),
                ..Default::default()
            });

        let value = module.field_group_record().fields[1].to_value();
        assert_eq!(
            value["conditional_logic"],
            json!([[{ "field": "field_show_slides", "operator": "==", "value": 1 }]])
        );
        assert_eq!(value["instructions"], json!("Up to five slides"));
        assert_eq!(value["max"], json!(5));
        assert!(module.dangling_conditions().is_empty());
    }

    /// Rendering a module twice gives the same records
    #[test]
    fn test_field_group_render_is_idempotent() {
        let mut module = Module::new("Stats", "content");
        module
            .add_repeater("numbers", "Numbers")
            .add_number("value", "Value", NumberSettings::default());

        assert_eq!(module.field_group_record(), module.field_group_record());
    }
}
