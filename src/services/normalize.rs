use crate::models::BackupOptions;
use crate::presets::try_expand;

/// Derive computed fields from raw user input.
///
/// - `id` becomes `""` when unset or empty, otherwise `"_<id>"` so it can be
///   appended directly to a folder name.
/// - An active preset replaces `file_exclusions` and `dir_exclusions` with
///   its catalog entry.
///
/// Must run exactly once per record, before validation. Running it again
/// prefixes `id` a second time.
pub fn preprocess(options: &mut BackupOptions) {
    options.id = match options.id.take() {
        Some(id) if !id.is_empty() => Some(format!("_{}", id)),
        _ => Some(String::new()),
    };
    tracing::debug!("Normalized backup id: {:?}", options.id_suffix());

    if let Some(info) = try_expand(options.preset) {
        if !options.file_exclusions.is_empty() || !options.dir_exclusions.is_empty() {
            tracing::debug!(
                "Preset {} replaces {} file and {} directory exclusions",
                options.preset,
                options.file_exclusions.len(),
                options.dir_exclusions.len()
            );
        }

        options.file_exclusions = info.exclusion_set();
        options.dir_exclusions = info.directory_set();

        tracing::debug!(
            "Expanded preset {}: {} file exclusions, {} directory exclusions",
            options.preset,
            options.file_exclusions.len(),
            options.dir_exclusions.len()
        );
    }
}
