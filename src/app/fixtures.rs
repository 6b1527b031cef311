//! Canned scans shared by the unit tests.

use crate::app::models::{
    ColumnMetadata, Confidence, ConstraintDetail, RecommendationEntry, RecommendationResponse,
    TableInfo, TableMetadataResponse, TableRecommendation,
};

pub fn column(name: &str, data_type: &str, max_length: Option<i64>) -> ColumnMetadata {
    ColumnMetadata {
        name: name.to_string(),
        data_type: data_type.to_string(),
        max_length,
        is_primary_key: false,
        is_nullable: false,
        is_identity: false,
        comment: None,
    }
}

pub fn key(name: &str) -> ColumnMetadata {
    ColumnMetadata {
        is_primary_key: true,
        is_identity: true,
        ..column(name, "int", None)
    }
}

pub fn member_table() -> TableInfo {
    let mut address2 = column("AddressLine2", "varchar", Some(100));
    address2.is_nullable = true;
    let mut email = column("EmailAddress", "varchar", Some(100));
    email.comment = Some("Primary contact address".to_string());

    TableInfo {
        name: "member".to_string(),
        total_rows: 1250,
        columns: vec![
            key("MemberID"),
            column("FirstName", "varchar", Some(50)),
            column("LastName", "varchar", Some(50)),
            column("DateOfBirth", "date", None),
            column("Gender", "char", Some(1)),
            column("AddressLine1", "varchar", Some(100)),
            address2,
            column("City", "varchar", Some(50)),
            column("State", "char", Some(2)),
            column("ZipCode", "varchar", Some(10)),
            column("PhoneNumber", "varchar", Some(15)),
            email,
        ],
    }
}

pub fn claim_table() -> TableInfo {
    TableInfo {
        name: "claim".to_string(),
        total_rows: 8800,
        columns: vec![
            key("ClaimID"),
            column("MemberID", "int", None),
            column("ClaimDate", "date", None),
            column("Amount", "decimal", None),
        ],
    }
}

pub fn provider_table() -> TableInfo {
    TableInfo {
        name: "provider".to_string(),
        total_rows: 40,
        columns: vec![key("ProviderID"), column("ProviderName", "varchar", Some(80))],
    }
}

pub fn fk(name: &str, child: (&str, &str), referenced: (&str, &str)) -> ConstraintDetail {
    ConstraintDetail {
        constraint_name: name.to_string(),
        child_table: child.0.to_string(),
        child_column: child.1.to_string(),
        referenced_table: referenced.0.to_string(),
        referenced_column: referenced.1.to_string(),
    }
}

pub fn member_scan() -> TableMetadataResponse {
    TableMetadataResponse {
        central_tables: vec![member_table()],
        parent_tables: vec![],
        child_tables: vec![claim_table()],
        constraints: vec![fk("FK_claim_member", ("claim", "MemberID"), ("member", "MemberID"))],
    }
}

pub fn claim_scan() -> TableMetadataResponse {
    TableMetadataResponse {
        central_tables: vec![claim_table()],
        parent_tables: vec![member_table(), provider_table()],
        child_tables: vec![],
        constraints: vec![fk("FK_claim_member", ("claim", "MemberID"), ("member", "MemberID"))],
    }
}

pub fn entry(column: &str, generator: &str, confidence: u8) -> RecommendationEntry {
    RecommendationEntry {
        column_name: column.to_string(),
        generator: generator.to_string(),
        confidence: Confidence::new(confidence).expect("confidence in range"),
    }
}

pub fn member_recommendations() -> RecommendationResponse {
    RecommendationResponse {
        central_tables: vec![TableRecommendation {
            table_name: "member".to_string(),
            columns: vec![
                entry("MemberID", "randomNumber", 100),
                entry("FirstName", "firstName", 100),
                entry("LastName", "lastName", 100),
                entry("DateOfBirth", "pastDate", 95),
                entry("Gender", "gender", 85),
                entry("PhoneNumber", "not known", 100),
            ],
        }],
        parent_tables: vec![],
        child_tables: vec![TableRecommendation {
            table_name: "claim".to_string(),
            columns: vec![entry("ClaimDate", "pastDate", 92)],
        }],
    }
}
