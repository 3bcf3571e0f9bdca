use sqlpilot::toolkit::{LIST_TABLES_TOOL, QUERY_TOOL, SCHEMA_TOOL};
use sqlpilot::transcript::{
    extract_sql_command, reasoning_excerpt, render_transcript, Step, FINAL_ANSWER_LABEL,
    NO_SQL_COMMAND, THOUGHT_PLACEHOLDER,
};

fn action(tool_name: &str, tool_input: &str) -> Step {
    Step::Action {
        tool_name: tool_name.to_string(),
        tool_input: tool_input.to_string(),
        observation: String::new(),
        reasoning: String::new(),
    }
}

#[test]
fn test_extract_sql_from_empty_transcript() {
    assert_eq!(extract_sql_command(&[]), NO_SQL_COMMAND);
}

#[test]
fn test_extract_sql_single_query() {
    let steps = vec![action(QUERY_TOOL, "SELECT * FROM products")];
    assert_eq!(extract_sql_command(&steps), "SELECT * FROM products");
}

#[test]
fn test_extract_sql_first_query_wins() {
    let steps = vec![
        action(QUERY_TOOL, "SELECT price FROM products WHERE product_id = 1"),
        action(QUERY_TOOL, "SELECT stock FROM products WHERE product_id = 1"),
    ];
    assert_eq!(
        extract_sql_command(&steps),
        "SELECT price FROM products WHERE product_id = 1"
    );
}

#[test]
fn test_extract_sql_ignores_other_tools() {
    let steps = vec![
        action(LIST_TABLES_TOOL, ""),
        action(SCHEMA_TOOL, "products"),
    ];
    assert_eq!(extract_sql_command(&steps), NO_SQL_COMMAND);
}

#[test]
fn test_extract_sql_after_discovery_steps() {
    let update = "UPDATE products SET price = 1600.0 WHERE product_name = 'Gaming Mouse'";
    let steps = vec![
        action(LIST_TABLES_TOOL, ""),
        action(SCHEMA_TOOL, "products"),
        action(QUERY_TOOL, update),
    ];
    assert_eq!(extract_sql_command(&steps), update);
}

#[test]
fn test_render_action_block() {
    let steps = vec![Step::Action {
        tool_name: SCHEMA_TOOL.to_string(),
        tool_input: "products".to_string(),
        observation: "CREATE TABLE products (...)".to_string(),
        reasoning: "Thought: I should look at the products table first.\nAction: sql_db_schema"
            .to_string(),
    }];

    let blocks = render_transcript(&steps);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].thought, "I should look at the products table first.");
    assert_eq!(blocks[0].action, SCHEMA_TOOL);
    assert_eq!(blocks[0].input.as_deref(), Some("products"));
    assert_eq!(blocks[0].observation, "CREATE TABLE products (...)");
}

#[test]
fn test_render_finish_block() {
    let steps = vec![Step::Finish {
        final_output: "The Gaming Mouse costs 1500 baht.".to_string(),
    }];

    let blocks = render_transcript(&steps);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].action, FINAL_ANSWER_LABEL);
    assert_eq!(blocks[0].input, None);
    assert_eq!(blocks[0].observation, "The Gaming Mouse costs 1500 baht.");
    assert!(!blocks[0].thought.is_empty());
}

#[test]
fn test_render_preserves_order() {
    let steps = vec![
        action(LIST_TABLES_TOOL, ""),
        action(QUERY_TOOL, "SELECT 1"),
        Step::Finish {
            final_output: "done".to_string(),
        },
    ];

    let blocks = render_transcript(&steps);
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].action, LIST_TABLES_TOOL);
    assert_eq!(blocks[1].action, QUERY_TOOL);
    assert_eq!(blocks[2].action, FINAL_ANSWER_LABEL);
}

#[test]
fn test_reasoning_excerpt_between_markers() {
    let text = "Thought: The user wants the price.\nAction: sql_db_query";
    assert_eq!(reasoning_excerpt(text), "The user wants the price.");
}

#[test]
fn test_reasoning_excerpt_runs_to_end_without_action() {
    let text = "Thought: Nothing left to look up.";
    assert_eq!(reasoning_excerpt(text), "Nothing left to look up.");
}

#[test]
fn test_reasoning_excerpt_spans_lines() {
    let text = "Thought: First check the schema.\nThen write the update.\nAction: sql_db_schema";
    assert_eq!(
        reasoning_excerpt(text),
        "First check the schema.\nThen write the update."
    );
}

#[test]
fn test_reasoning_excerpt_without_marker_yields_placeholder() {
    let text = "Looking up the products table before answering.";
    assert_eq!(reasoning_excerpt(text), THOUGHT_PLACEHOLDER);
}

#[test]
fn test_reasoning_excerpt_empty_yields_placeholder() {
    assert_eq!(reasoning_excerpt(""), THOUGHT_PLACEHOLDER);
    assert_eq!(reasoning_excerpt("   \n  "), THOUGHT_PLACEHOLDER);
}
