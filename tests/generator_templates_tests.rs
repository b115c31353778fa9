use sdkgen::generator::{
    write_client_interface, write_enum, write_model_class, write_service_version,
    ClientInterfaceTemplateData, EnumValueView, FieldView, FixedEnumTemplateData,
    ModelClassTemplateData, ServiceVersionTemplateData, VersionView,
};
use askama::Template;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("gen_tpl_test_{}_{}", std::process::id(), nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_model_class_writer() {
    let dir = temp_dir();
    let path = dir.join("Pet.java");

    let data = ModelClassTemplateData {
        package: "com.example.petstore.models".to_string(),
        imports: vec![
            "com.clientcore.serialization.json.JsonWriter".to_string(),
            "java.io.IOException".to_string(),
        ],
        javadoc: vec![
            "/**".to_string(),
            " * The Pet model.".to_string(),
            " */".to_string(),
        ],
        name: "Pet".to_string(),
        extends: String::new(),
        is_final: true,
        fields: vec![FieldView {
            declaration: "String".to_string(),
            name: "name".to_string(),
        }],
        methods: vec!["    public String getName() {\n        return this.name;\n    }"
            .to_string()],
    };
    write_model_class(&path, &data, true).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("package com.example.petstore.models;"));
    assert!(content.contains("import java.io.IOException;"));
    assert!(content.contains(" * The Pet model."));
    assert!(content.contains("public final class Pet {"));
    assert!(content.contains("private String name;"));
    assert!(content.contains("public String getName() {"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_model_class_writer_skips_existing_without_force() {
    let dir = temp_dir();
    let path = dir.join("Pet.java");
    fs::write(&path, "// hand edited").unwrap();

    let data = ModelClassTemplateData {
        package: "com.example.models".to_string(),
        imports: vec![],
        javadoc: vec![],
        name: "Pet".to_string(),
        extends: String::new(),
        is_final: true,
        fields: vec![],
        methods: vec![],
    };
    write_model_class(&path, &data, false).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "// hand edited");

    write_model_class(&path, &data, true).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("class Pet"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_fixed_enum_template() {
    let dir = temp_dir();
    let path = dir.join("PetStatus.java");

    let rendered = FixedEnumTemplateData {
        package: "com.example.petstore.models".to_string(),
        javadoc: vec![
            "/**".to_string(),
            " * Defines values for PetStatus.".to_string(),
            " */".to_string(),
        ],
        name: "PetStatus".to_string(),
        values: vec![
            EnumValueView {
                constant: "AVAILABLE".to_string(),
                wire: "available".to_string(),
            },
            EnumValueView {
                constant: "SOLD".to_string(),
                wire: "sold".to_string(),
            },
        ],
    }
    .render()
    .unwrap();
    write_enum(&path, rendered, true).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("public enum PetStatus {"));
    assert!(content.contains("AVAILABLE(\"available\"),"));
    assert!(content.contains("SOLD(\"sold\");"));
    assert!(content.contains("public static PetStatus fromString(String value) {"));
    assert!(content.contains("public String toString() {"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_client_interface_template() {
    let dir = temp_dir();
    let path = dir.join("PetStoreService.java");

    write_client_interface(
        &path,
        &ClientInterfaceTemplateData {
            package: "com.example.petstore".to_string(),
            imports: vec!["com.example.petstore.models.Pet".to_string()],
            javadoc: vec![],
            name: "PetStoreService".to_string(),
            methods: vec!["    Response<Pet> getPet(String petId);".to_string()],
        },
        true,
    )
    .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("public interface PetStoreService {"));
    assert!(content.contains("Response<Pet> getPet(String petId);"));
    assert!(!content.contains("{ }"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_service_version_template() {
    let dir = temp_dir();
    let path = dir.join("PetStoreServiceVersion.java");

    write_service_version(
        &path,
        &ServiceVersionTemplateData {
            package: "com.example.petstore".to_string(),
            import: "com.clientcore.http.ServiceVersion".to_string(),
            title: "Pet Store".to_string(),
            name: "PetStoreServiceVersion".to_string(),
            versions: vec![
                VersionView {
                    constant: "V2024_05_01".to_string(),
                    literal: "2024-05-01".to_string(),
                },
                VersionView {
                    constant: "V2025_01_01".to_string(),
                    literal: "2025-01-01".to_string(),
                },
            ],
            latest: "V2025_01_01".to_string(),
        },
        true,
    )
    .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("public enum PetStoreServiceVersion implements ServiceVersion {"));
    assert!(content.contains("V2024_05_01(\"2024-05-01\"),"));
    assert!(content.contains("V2025_01_01(\"2025-01-01\");"));
    assert!(content.contains("return V2025_01_01;"));

    fs::remove_dir_all(&dir).unwrap();
}
