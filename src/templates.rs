//! Statement shapes emitted by the DDL provider and the alter-script
//! generator.

use crate::template::{Template, opt, slot, text};

pub const CREATE_SCHEMA: Template = Template::new(
    "createSchema",
    &[text("CREATE USER "), slot("schemaName"), text(" NO AUTHENTICATION")],
);

pub const COMMENT: Template = Template::new(
    "comment",
    &[
        text("COMMENT ON "),
        slot("object"),
        text(" "),
        slot("objectName"),
        text(" IS "),
        slot("comment"),
        text(";"),
    ],
);

pub const CREATE_TABLE: Template = Template::new(
    "createTable",
    &[
        text("CREATE"),
        opt(" ", "tableType", ""),
        text(" TABLE "),
        slot("name"),
        opt("\n(\n\t", "tableProps", "\n)"),
        opt("\n", "options", ""),
    ],
);

pub const COLUMN_DEFINITION: Template = Template::new(
    "columnDefinition",
    &[
        slot("name"),
        opt(" ", "type", ""),
        opt(" DEFAULT ", "default", ""),
        opt(" ", "encrypt", ""),
        opt(" ", "constraints", ""),
    ],
);

pub const OBJECT_TYPE_ATTRIBUTE: Template = Template::new(
    "objectTypeColumnDefinition",
    &[slot("name"), opt(" ", "type", "")],
);

pub const KEY_CONSTRAINT: Template = Template::new(
    "createKeyConstraint",
    &[
        opt("CONSTRAINT ", "constraintName", " "),
        slot("keyType"),
        opt(" ", "columns", ""),
        opt(" ", "options", ""),
    ],
);

pub const FOREIGN_KEY_CONSTRAINT: Template = Template::new(
    "createForeignKeyConstraint",
    &[
        opt("CONSTRAINT ", "name", " "),
        text("FOREIGN KEY ("),
        slot("foreignKey"),
        text(") REFERENCES "),
        slot("primaryTable"),
        text(" ("),
        slot("primaryKey"),
        text(")"),
    ],
);

pub const CHECK_CONSTRAINT: Template = Template::new(
    "checkConstraint",
    &[opt("CONSTRAINT ", "name", " "), text("CHECK ("), slot("expression"), text(")")],
);

pub const CREATE_FOREIGN_KEY: Template = Template::new(
    "createForeignKey",
    &[
        text("ALTER TABLE "),
        slot("foreignTable"),
        text(" ADD"),
        opt(" CONSTRAINT ", "name", ""),
        text(" FOREIGN KEY ("),
        slot("foreignKey"),
        text(") REFERENCES "),
        slot("primaryTable"),
        text(" ("),
        slot("primaryKey"),
        text(");"),
    ],
);

pub const CREATE_INDEX: Template = Template::new(
    "createIndex",
    &[
        text("CREATE"),
        opt(" ", "indexType", ""),
        text(" INDEX "),
        slot("name"),
        text(" ON "),
        slot("tableName"),
        slot("keys"),
        opt(" ", "options", ""),
        text(";"),
    ],
);

pub const CREATE_VIEW: Template = Template::new(
    "createView",
    &[
        text("CREATE"),
        opt(" ", "orReplace", ""),
        opt(" ", "force", ""),
        opt(" ", "viewType", ""),
        text(" VIEW "),
        slot("name"),
        text("\n\tAS "),
        slot("selectStatement"),
    ],
);

pub const VIEW_SELECT_STATEMENT: Template = Template::new(
    "viewSelectStatement",
    &[text("SELECT "), slot("keys"), opt("\n\tFROM ", "tableName", "")],
);

pub const CREATE_OBJECT_TYPE: Template = Template::new(
    "createObjectType",
    &[
        text("CREATE OR REPLACE TYPE "),
        slot("name"),
        text(" AS OBJECT\n(\n\t"),
        slot("properties"),
        text("\n);"),
    ],
);

pub const CREATE_COLLECTION_TYPE: Template = Template::new(
    "createCollectionType",
    &[
        text("CREATE OR REPLACE TYPE "),
        slot("name"),
        text(" IS "),
        slot("collectionType"),
        opt("(", "size", ")"),
        text(" OF ("),
        slot("datatype"),
        text(")"),
        opt(" ", "notPersistable", ""),
        text(";"),
    ],
);

pub const IF_NOT_EXISTS: Template = Template::new(
    "ifNotExists",
    &[
        text("DECLARE\nBEGIN\n\tEXECUTE IMMEDIATE '"),
        slot("statement"),
        text("';\n\tEXCEPTION WHEN OTHERS THEN\n\t\tIF SQLCODE = -"),
        slot("errorCode"),
        text(" THEN NULL; ELSE RAISE; END IF;\nEND;\n/"),
    ],
);

// Alter shapes

pub const DROP_USER: Template = Template::new("dropUser", &[text("DROP USER "), slot("name"), text(";")]);

pub const DROP_TABLE: Template = Template::new("dropTable", &[text("DROP TABLE "), slot("name"), text(";")]);

pub const ADD_COLUMN: Template = Template::new(
    "addColumn",
    &[text("ALTER TABLE "), slot("name"), text(" ADD ("), slot("column"), text(");")],
);

pub const DROP_COLUMN: Template = Template::new(
    "dropColumn",
    &[text("ALTER TABLE "), slot("name"), text(" DROP COLUMN "), slot("column"), text(";")],
);

pub const RENAME_COLUMN: Template = Template::new(
    "renameColumn",
    &[
        text("ALTER TABLE "),
        slot("name"),
        text(" RENAME COLUMN "),
        slot("oldName"),
        text(" TO "),
        slot("newName"),
        text(";"),
    ],
);

pub const MODIFY_COLUMN: Template = Template::new(
    "modifyColumn",
    &[
        text("ALTER TABLE "),
        slot("name"),
        text(" MODIFY ("),
        slot("column"),
        opt(" ", "type", ""),
        text(");"),
    ],
);

pub const DROP_VIEW: Template = Template::new("dropView", &[text("DROP VIEW "), slot("name"), text(";")]);

pub const DROP_TYPE: Template = Template::new("dropType", &[text("DROP TYPE "), slot("name"), text(";")]);

pub const ADD_ATTRIBUTE: Template = Template::new(
    "addAttribute",
    &[text("ALTER TYPE "), slot("name"), text(" ADD ATTRIBUTE "), slot("attribute"), text(";")],
);

pub const DROP_ATTRIBUTE: Template = Template::new(
    "dropAttribute",
    &[text("ALTER TYPE "), slot("name"), text(" DROP ATTRIBUTE "), slot("attribute"), text(";")],
);

pub const MODIFY_ATTRIBUTE: Template = Template::new(
    "modifyAttribute",
    &[
        text("ALTER TYPE "),
        slot("name"),
        text(" MODIFY ATTRIBUTE "),
        slot("attribute"),
        opt(" ", "type", ""),
        text(";"),
    ],
);
