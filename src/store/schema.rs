pub const SCHEMA: &str = r#"
-- Single-value-per-key store; values are JSON documents
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    expires_at INTEGER,         -- unix millis, NULL = never
    updated_at TEXT DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_kv_expires ON kv(expires_at);
"#;
