//! Plain-text output for the headless subcommands

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::api::Template;

pub fn templates_table(templates: &[Template]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Created"]);

    for template in templates {
        table.add_row(vec![
            template.id.to_string(),
            template.name.clone(),
            template.created_at.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub fn template_details(template: &Template) -> String {
    let mut out = format!("id:      {}\nname:    {}\n", template.id, template.name);
    if let Some(created) = &template.created_at {
        out.push_str(&format!("created: {}\n", created));
    }
    out.push('\n');
    out.push_str(&template.html);
    if let Some(css) = &template.css {
        out.push_str("\n\n/* css */\n");
        out.push_str(css);
    }
    out
}
