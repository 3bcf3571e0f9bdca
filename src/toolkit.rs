//! The four database tools exposed to the model.

use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Value};

use crate::db::{Database, SAMPLE_ROW_LIMIT};
use crate::error::SqlPilotError;

pub const LIST_TABLES_TOOL: &str = "sql_db_list_tables";
pub const SCHEMA_TOOL: &str = "sql_db_schema";
pub const QUERY_TOOL: &str = "sql_db_query";
pub const QUERY_CHECKER_TOOL: &str = "sql_db_query_checker";

struct ToolSpec {
    name: &'static str,
    description: &'static str,
    input_schema: Value,
}

pub struct SqlToolkit {
    db: Database,
    specs: Vec<ToolSpec>,
}

impl SqlToolkit {
    pub fn new(db: Database) -> Self {
        let specs = vec![
            ToolSpec {
                name: LIST_TABLES_TOOL,
                description: "List the tables available in the database, comma-separated. \
                              Call this before anything else.",
                input_schema: json!({
                    "type": "object",
                    "properties": {},
                    "additionalProperties": false
                }),
            },
            ToolSpec {
                name: SCHEMA_TOOL,
                description: "Return the CREATE TABLE statement and sample rows for the given \
                              tables. Call sql_db_list_tables first to make sure the tables \
                              exist.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "table_names": {
                            "type": "string",
                            "description": "Comma-separated list of table names"
                        }
                    },
                    "required": ["table_names"],
                    "additionalProperties": false
                }),
            },
            ToolSpec {
                name: QUERY_TOOL,
                description: "Execute a SQL statement against the database and return the \
                              result. If an error comes back, rewrite the statement and try \
                              again.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "A single SQL statement to execute"
                        }
                    },
                    "required": ["query"],
                    "additionalProperties": false
                }),
            },
            ToolSpec {
                name: QUERY_CHECKER_TOOL,
                description: "Check whether a SQL statement compiles before executing it. \
                              Returns the statement unchanged when it is valid.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The SQL statement to check"
                        }
                    },
                    "required": ["query"],
                    "additionalProperties": false
                }),
            },
        ];
        Self { db, specs }
    }

    /// Tool definitions in the chat-completions `tools` format.
    pub fn definitions(&self) -> Vec<Value> {
        self.specs
            .iter()
            .map(|spec| {
                json!({
                    "type": "function",
                    "function": {
                        "name": spec.name,
                        "description": spec.description,
                        "parameters": spec.input_schema,
                    }
                })
            })
            .collect()
    }

    pub fn validate_arguments(&self, tool_name: &str, arguments: &Value) -> Result<(), String> {
        let spec = self
            .specs
            .iter()
            .find(|s| s.name == tool_name)
            .ok_or_else(|| format!("Tool '{}' not found", tool_name))?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&spec.input_schema)
            .map_err(|e| format!("Invalid tool schema: {}", e))?;

        if let Err(errors) = schema.validate(arguments) {
            let error_messages: Vec<String> = errors
                .map(|e| format!("{}: {}", e.instance_path, e))
                .collect();
            return Err(error_messages.join("; "));
        }

        Ok(())
    }

    /// Run a tool. An Err carries the message that goes back to the
    /// model as the observation.
    pub fn dispatch(&self, tool_name: &str, arguments: &Value) -> Result<String, String> {
        match tool_name {
            LIST_TABLES_TOOL => self.list_tables(),
            SCHEMA_TOOL => self.table_info(arguments),
            QUERY_TOOL => self.run_query(arguments),
            QUERY_CHECKER_TOOL => self.check_query(arguments),
            other => Err(format!("Tool '{}' not found", other)),
        }
    }

    /// The input recorded for a tool call: the bare SQL or table list
    /// rather than the argument JSON.
    pub fn tool_input_text(tool_name: &str, arguments: &Value) -> String {
        let key = match tool_name {
            QUERY_TOOL | QUERY_CHECKER_TOOL => "query",
            SCHEMA_TOOL => "table_names",
            _ => return String::new(),
        };
        arguments
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| arguments.to_string())
    }

    fn list_tables(&self) -> Result<String, String> {
        let names = self.db.table_names().map_err(db_message)?;
        Ok(names.join(", "))
    }

    fn table_info(&self, arguments: &Value) -> Result<String, String> {
        let requested = required_str(arguments, "table_names")?;
        let known = self.db.table_names().map_err(db_message)?;

        let wanted: Vec<&str> = requested
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let missing: Vec<String> = wanted
            .iter()
            .filter(|t| !known.iter().any(|k| k == *t))
            .map(|t| format!("'{}'", t))
            .collect();
        if !missing.is_empty() {
            return Err(format!(
                "table_names {} not found in database",
                missing.join(", ")
            ));
        }

        let mut sections = Vec::new();
        for table in wanted {
            let ddl = self
                .db
                .table_ddl(table)
                .map_err(db_message)?
                .unwrap_or_default();
            let samples = self.db.sample_rows(table).map_err(db_message)?;
            sections.push(format!(
                "{}\n\n/*\n{} rows from {} table:\n{}\n*/",
                ddl, SAMPLE_ROW_LIMIT, table, samples
            ));
        }
        Ok(sections.join("\n\n"))
    }

    fn run_query(&self, arguments: &Value) -> Result<String, String> {
        let query = required_str(arguments, "query")?;
        self.db.execute_sql(query).map_err(db_message)
    }

    fn check_query(&self, arguments: &Value) -> Result<String, String> {
        let query = required_str(arguments, "query")?;
        self.db.check_sql(query).map_err(db_message)?;
        Ok(query.to_string())
    }
}

fn required_str<'a>(arguments: &'a Value, key: &str) -> Result<&'a str, String> {
    arguments
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("Missing required argument: {}", key))
}

/// Strip the error-enum wrapping so the model sees the bare SQLite
/// message.
fn db_message(err: SqlPilotError) -> String {
    match err {
        SqlPilotError::DatabaseError(inner) => inner.to_string(),
        other => other.to_string(),
    }
}
