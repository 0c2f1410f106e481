//! DDL builders for NOTIFY trigger plumbing: a pl/pgsql trigger function
//! that `pg_notify`s a JSON payload, and the trigger wiring around it.
//!
//! Statement text only. Listening for the notifications is the caller's
//! concern and deliberately out of scope here.

use serde::{Deserialize, Serialize};

/// What the generated trigger function packs into the notification payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyPayload {
    /// Table name and lower-cased operation only.
    TableName,
    /// The affected row as JSON (`row_to_json(NEW)`).
    Row,
    /// Operation, table name and affected record, with a `CASE TG_OP`
    /// covering INSERT/UPDATE/DELETE.
    Full,
}

pub fn create_notify_function(function: &str, channel: &str, payload: NotifyPayload) -> String {
    let body = match payload {
        NotifyPayload::TableName => format!(
            r#"
DECLARE
    payload TEXT;
BEGIN
    payload := json_build_object('table_name', TG_TABLE_NAME, 'action', LOWER(TG_OP));
    PERFORM pg_notify('{channel}', payload);
    RETURN NEW;
END;
"#
        ),
        NotifyPayload::Row => format!(
            r#"
DECLARE
    payload TEXT;
BEGIN
    payload := row_to_json(NEW);
    PERFORM pg_notify('{channel}', payload);
    RETURN NEW;
END;
"#
        ),
        NotifyPayload::Full => format!(
            r#"
DECLARE
    rec RECORD;
    payload TEXT;
BEGIN
    CASE TG_OP
    WHEN 'UPDATE' THEN
        rec := NEW;
    WHEN 'INSERT' THEN
        rec := NEW;
    WHEN 'DELETE' THEN
        rec := OLD;
    ELSE
        RAISE EXCEPTION 'Unknown TG_OP: "%". Should not occur!', TG_OP;
    END CASE;
    payload := json_build_object('action', LOWER(TG_OP), 'identity', TG_TABLE_NAME, 'record', row_to_json(rec));
    PERFORM pg_notify('{channel}', payload);
    RETURN rec;
END;
"#
        ),
    };
    format!("CREATE OR REPLACE FUNCTION {function}() RETURNS trigger AS $${body}$$ LANGUAGE plpgsql;")
}

pub fn drop_function(function: &str) -> String { format!("DROP FUNCTION {}();", function) }

pub fn create_trigger(trigger: &str, table: &str, function: &str) -> String {
    format!("CREATE TRIGGER {} AFTER INSERT OR UPDATE ON {} FOR EACH ROW EXECUTE PROCEDURE {}();", trigger, table, function)
}

pub fn drop_trigger(trigger: &str, table: &str) -> String { format!("DROP TRIGGER {} ON {};", trigger, table) }

pub fn listen(channel: &str) -> String { format!("LISTEN {};", channel) }

pub fn unlisten(channel: &str) -> String { format!("UNLISTEN {};", channel) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_wiring() {
        assert_eq!(
            create_trigger("t_notify", "t", "notify_t"),
            "CREATE TRIGGER t_notify AFTER INSERT OR UPDATE ON t FOR EACH ROW EXECUTE PROCEDURE notify_t();"
        );
        assert_eq!(drop_trigger("t_notify", "t"), "DROP TRIGGER t_notify ON t;");
        assert_eq!(drop_function("notify_t"), "DROP FUNCTION notify_t();");
        assert_eq!(listen("changes"), "LISTEN changes;");
        assert_eq!(unlisten("changes"), "UNLISTEN changes;");
    }

    #[test]
    fn notify_function_payloads() {
        let table_name = create_notify_function("notify_t", "changes", NotifyPayload::TableName);
        assert!(table_name.starts_with("CREATE OR REPLACE FUNCTION notify_t() RETURNS trigger AS $$"));
        assert!(table_name.contains("pg_notify('changes', payload)"));
        assert!(table_name.contains("'table_name', TG_TABLE_NAME"));
        assert!(table_name.ends_with("$$ LANGUAGE plpgsql;"));

        let row = create_notify_function("notify_t", "changes", NotifyPayload::Row);
        assert!(row.contains("row_to_json(NEW)"));

        let full = create_notify_function("notify_t", "changes", NotifyPayload::Full);
        assert!(full.contains("CASE TG_OP"));
        assert!(full.contains("WHEN 'DELETE' THEN"));
        assert!(full.contains("'record', row_to_json(rec)"));
    }
}
