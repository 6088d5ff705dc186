//! End-to-end tests across the block model, collections and editor
//!
//! Flow: service record JSON -> load -> edit per collection -> export arrays.

use std::fs;

use pretty_assertions::assert_eq;
use svc_blocks::{BlockPatch, BlockType};
use svc_content::{
    BlockEditor, CollectionKind, EditorError, FaqEntry, ServiceArrays, ServiceBlocks,
    ServiceRecord, SettingsResolver,
};
use tempfile::TempDir;

const RECORD: &str = r#"{
    "caracteristicas": "- Atención 24h\n- Soporte remoto",
    "beneficios": ["Ahorro de tiempo"],
    "incluye": null,
    "noIncluye": "• Desplazamientos",
    "faq": "P: ¿Cuánto tarda?\nR: Dos días"
}"#;

fn loaded() -> ServiceBlocks {
    let record = ServiceRecord::from_json(RECORD).unwrap();
    let mut blocks = ServiceBlocks::new();
    blocks.load_from_service(&record);
    blocks
}

#[test]
fn test_record_round_trip_without_edits() {
    let arrays = loaded().get_as_arrays();

    assert_eq!(
        arrays,
        ServiceArrays {
            caracteristicas: vec!["Atención 24h".into(), "Soporte remoto".into()],
            beneficios: vec!["Ahorro de tiempo".into()],
            incluye: vec![],
            no_incluye: vec!["Desplazamientos".into()],
            faq: vec![FaqEntry::new("¿Cuánto tarda?", "Dos días")],
        }
    );

    // Exported arrays are themselves a valid record and reload to the same shape.
    let json = serde_json::to_string(&arrays).unwrap();
    let mut reloaded = ServiceBlocks::new();
    reloaded.load_from_service(&ServiceRecord::from_json(&json).unwrap());
    assert_eq!(reloaded.get_as_arrays(), arrays);
}

#[test]
fn test_editing_session_with_project_settings() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join(".svc-blocks")).unwrap();
    fs::write(
        root.path().join(".svc-blocks/editor.toml"),
        "[includes]\nmax_blocks = 2\n\n[faq]\nmax_blocks = 2\n",
    )
    .unwrap();

    let settings = SettingsResolver::new(root.path())
        .with_global_dir(None)
        .resolve()
        .unwrap();
    let mut blocks = loaded();

    {
        let config = settings.get(CollectionKind::Includes);
        let mut editor = BlockEditor::new(&mut blocks, CollectionKind::Includes, config);

        let first = editor.add(BlockType::ListItem).unwrap();
        editor.update(&first, &BlockPatch::content("Materiales"));
        let second = editor.add(BlockType::ListItem).unwrap();
        editor.update(&second, &BlockPatch::content("Mano de obra"));

        assert!(!editor.can_add());
        assert_eq!(
            editor.add(BlockType::ListItem),
            Err(EditorError::LimitReached {
                kind: CollectionKind::Includes,
                max: 2,
            })
        );

        assert!(editor.move_up(&second));
    }

    {
        let config = settings.get(CollectionKind::Faq);
        let mut editor = BlockEditor::new(&mut blocks, CollectionKind::Faq, config);

        assert!(matches!(
            editor.add(BlockType::ListItem),
            Err(EditorError::TypeNotAllowed { .. })
        ));

        let id = editor.add(BlockType::FaqItem).unwrap();
        editor.update(&id, &BlockPatch::faq("¿Hay garantía?", "Un año"));
    }

    let arrays = blocks.get_as_arrays();
    assert_eq!(arrays.incluye, vec!["Mano de obra", "Materiales"]);
    assert_eq!(
        arrays.faq,
        vec![
            FaqEntry::new("¿Cuánto tarda?", "Dos días"),
            FaqEntry::new("¿Hay garantía?", "Un año"),
        ]
    );
    assert_eq!(arrays.caracteristicas.len(), 2);
}

#[test]
fn test_generated_content_replaces_collection() {
    let settings = SettingsResolver::new(TempDir::new().unwrap().path())
        .with_global_dir(None)
        .resolve()
        .unwrap();
    let mut blocks = loaded();

    let generated = "**¿Trabajan festivos?** Sí, con recargo.\n\n\
                     **¿Emiten factura?** Siempre.";
    let mut editor = BlockEditor::new(
        &mut blocks,
        CollectionKind::Faq,
        settings.get(CollectionKind::Faq),
    );
    assert_eq!(editor.apply_generated(generated), 2);
    assert_eq!(editor.apply_generated("   "), 0);

    let arrays = blocks.get_as_arrays();
    assert_eq!(
        arrays.faq,
        vec![
            FaqEntry::new("¿Trabajan festivos?", "Sí, con recargo."),
            FaqEntry::new("¿Emiten factura?", "Siempre."),
        ]
    );
}

#[test]
fn test_removing_every_block_exports_empty_arrays() {
    let mut blocks = loaded();
    for kind in CollectionKind::ALL {
        let ids: Vec<_> = blocks.blocks(kind).iter().map(|b| b.id.clone()).collect();
        for id in ids {
            assert!(blocks.remove_block(kind, &id));
        }
    }

    assert!(blocks.is_empty());
    assert_eq!(blocks.get_as_arrays(), ServiceArrays::default());
}
