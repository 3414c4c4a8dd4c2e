use concilia_core::FileRecord;

/// Collapse file records sharing `(original_name, declared_range_text)` to a
/// single survivor, preserving first-seen key order.
///
/// The registry accumulates duplicates when an upload is retried: the first
/// attempt persists a metadata row without a storage reference, the retry
/// persists a complete one. The survivor is the first record under the key
/// whose identity is a real external reference; if none qualifies the first
/// seen wins, so collisions resolve deterministically.
pub fn dedup_files(files: &[FileRecord]) -> Vec<&FileRecord> {
    let mut survivors: Vec<&FileRecord> = Vec::new();

    for file in files {
        match survivors.iter_mut().find(|s| same_key(s, file)) {
            Some(slot) => {
                if !slot.identity.is_real() && file.identity.is_real() {
                    *slot = file;
                }
            }
            None => survivors.push(file),
        }
    }

    survivors
}

fn same_key(a: &FileRecord, b: &FileRecord) -> bool {
    a.original_name == b.original_name && a.declared_range_text == b.declared_range_text
}
