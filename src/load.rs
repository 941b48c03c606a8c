use std::path::PathBuf;

use crate::cli::LoadArgs;
use crate::error::Error;

pub fn run(args: LoadArgs) -> Result<(), Error> {
    let input_path = PathBuf::from(&args.input);
    let out_dir = PathBuf::from(&args.out_dir);

    tracing::info!(input = %input_path.display(), "load: reading transformed records");
    let table = crate::store::read_table(&input_path)?;

    // Full-replace load: the dataset folder is wiped and rebuilt so stale
    // files never linger next to the fresh export.
    if out_dir.exists() {
        tracing::info!(dir = %out_dir.display(), "load: replacing dataset folder");
        std::fs::remove_dir_all(&out_dir)
            .map_err(|err| Error::io(format!("remove dataset dir: {}", out_dir.display()), err))?;
    }
    std::fs::create_dir_all(&out_dir)
        .map_err(|err| Error::io(format!("create dataset dir: {}", out_dir.display()), err))?;

    let out_path = out_dir.join(format!("{}_channel.csv", args.channel_name));
    crate::store::write_table(&out_path, &table)?;

    tracing::info!(
        rows = table.rows.len(),
        columns = table.headers.len(),
        out = %out_path.display(),
        "load: wrote dataset"
    );

    Ok(())
}
