// ============================================
// Demo - Жизнь одного мира от создания до экспорта
// ============================================

use blockworld::{
    preset_by_id, BlockPos, Hotbar, Vec3, WorldSession, WorldStore,
};

fn main() {
    env_logger::init();

    println!("=== Blockworld ===");
    println!("Демо: создание мира, стриминг чанков, правки, экспорт\n");

    let store = match WorldStore::open("worlds") {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Не удалось открыть хранилище миров: {}", err);
            return;
        }
    };

    let settings = preset_by_id("default")
        .map(|preset| preset.settings)
        .unwrap_or_default();
    let mut session = match WorldSession::create(&store, "Demo World", settings, Some(42)) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Не удалось создать мир: {}", err);
            return;
        }
    };

    // Прогулка на восток: окно чанков едет следом
    let mut position = Vec3::new(0.0, 20.0, 0.0);
    for step in 0..24 {
        position.x = step as f32 * 3.0;
        if let Some(report) = session.update(&store, position, Vec3::ZERO) {
            if report.loaded > 0 || report.evicted > 0 {
                println!(
                    "шаг {:2}: чанков +{} -{}, активно {}",
                    step,
                    report.loaded,
                    report.evicted,
                    session.active_chunk_count()
                );
            }
        }
    }

    // Правки через хотбар: стекло на поверхность, блок под ним долой
    let mut hotbar = Hotbar::new();
    hotbar.select(6);
    let x = position.x as i32;
    let ground = session.manager().generator().height_at(x, 0);
    let target = BlockPos::new(x, ground + 1, 0);
    if session.place_block(target, hotbar.selection()) {
        println!(
            "\nПоставлен блок {:?} на ({}, {}, {})",
            hotbar.selection().kind(),
            target.x,
            target.y,
            target.z
        );
    }
    if session.break_block(BlockPos::new(x, ground, 0)) {
        println!("Снят блок поверхности на ({}, {}, 0)", x, ground);
    }

    if session.save(&store) {
        println!("Мир сохранён");
    }

    match store.export_world("Demo World") {
        Ok(json) => {
            let path = "demo_world.json";
            match std::fs::write(path, &json) {
                Ok(()) => println!("Экспорт в {} ({} байт)", path, json.len()),
                Err(err) => eprintln!("Экспорт не записан: {}", err),
            }
        }
        Err(err) => eprintln!("Экспорт не удался: {}", err),
    }

    println!("\nСохранённые миры:");
    for world in store.list_worlds() {
        match store.world_stats(&world.name) {
            Ok(stats) => println!(
                "  {} - сид {}, чанков {}, блоков {}, {} КБ",
                stats.name,
                stats.seed,
                stats.chunk_count,
                stats.block_count,
                stats.size_bytes / 1024
            ),
            Err(_) => println!("  {} - сид {}", world.name, world.seed),
        }
    }

    if session.close(&store) {
        println!("\nСессия закрыта");
    }
}
