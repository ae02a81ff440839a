pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use tauri::{Manager, RunEvent};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(error) = try_run() {
        eprintln!("failed to launch application: {error}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let config = crate::config::AppConfig::from_env()?;

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(move |app| {
            let handle = app.handle();

            let data_dir = match config.data_dir.clone() {
                Some(dir) => dir,
                None => handle
                    .path()
                    .app_data_dir()
                    .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?,
            };
            std::fs::create_dir_all(&data_dir)?;

            crate::utils::logger::init_logging(&data_dir, &config)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let pool = crate::db::DbPool::new(data_dir.join(&config.database_file))
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let state = crate::commands::AppState::new(pool, config.clone())
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;
            app.manage(state);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            crate::commands::assessment::assessment_submit,
            crate::commands::assessment::assessment_get,
            crate::commands::assessment::assessment_list_recent,
            crate::commands::leads::newsletter_subscribe,
            crate::commands::leads::contact_submit,
            crate::commands::leads::consultation_book,
            crate::commands::leads::leads_list,
            crate::commands::roi::roi_calculate,
        ])
        .build(tauri::generate_context!())?;

    app.run(|handle, event| {
        if let RunEvent::Exit = event {
            if let Some(state) = handle.try_state::<crate::commands::AppState>() {
                state.shutdown();
            }
        }
    });

    Ok(())
}
