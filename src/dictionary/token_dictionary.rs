use std::{
    fs::{
        self,
        File,
    },
    io::{
        self,
        BufReader,
        BufWriter,
    },
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

use liblzma::read::XzDecoder;
use log::info;
use tar::Archive;
use vibrato::Dictionary;
use zstd::stream::{
    copy_decode,
    read::Decoder as ZstdDecoder,
};

use crate::{
    config::Settings,
    core::{
        http::{
            download_to_file,
            http_client,
        },
        BunsekiError,
    },
    persistence::get_app_data_dir,
};

const UNIDIC_URL: &str =
    "https://github.com/daac-tools/vibrato/releases/download/v0.5.0/bccwj-suw+unidic-cwj-3_1_1.tar.xz";
const UNIDIC_FOLDER: &str = "bccwj-suw+unidic-cwj-3_1_1";
const KEEP_FILES: [&str; 3] = ["system.dic", "BSD", "NOTICE"];

fn get_tokenizer_dict_dir() -> PathBuf {
    get_app_data_dir().join("dictionaries").join("tokenizer")
}

/// Explicit path from the settings, or the downloaded UniDic dictionary.
pub fn resolve_dictionary_path(settings: &Settings) -> Result<PathBuf, BunsekiError> {
    match &settings.tokenizer.dictionary_path {
        Some(path) if path.exists() => Ok(path.clone()),
        Some(path) => Err(BunsekiError::MissingDictionary(path.clone())),
        None => ensure_dictionary(&get_tokenizer_dict_dir()),
    }
}

/// Downloads and unpacks the UniDic vibrato dictionary into `dict_dir` unless
/// `system.dic` is already there.
pub fn ensure_dictionary(dict_dir: &Path) -> Result<PathBuf, BunsekiError> {
    let extract_path = dict_dir.join(UNIDIC_FOLDER);
    let final_dic_path = extract_path.join("system.dic");

    if final_dic_path.exists() {
        info!("Tokenizer dictionary already present at {:?}", final_dic_path);
        return Ok(final_dic_path);
    }

    fs::create_dir_all(dict_dir)?;

    // Leftovers from an interrupted attempt
    let download_path = dict_dir.join(format!("{}.tar.xz", UNIDIC_FOLDER));
    let tar_path = dict_dir.join(format!("{}.tar", UNIDIC_FOLDER));
    fs::remove_file(&download_path).ok();
    fs::remove_file(&tar_path).ok();
    fs::remove_dir_all(&extract_path).ok();

    info!("Downloading tokenizer dictionary from {}", UNIDIC_URL);
    let client = http_client(Duration::from_secs(120))?;
    download_to_file(&client, UNIDIC_URL, &download_path)?;

    info!("Decompressing XZ archive...");
    let mut xz_decoder = XzDecoder::new(BufReader::new(File::open(&download_path)?));
    let mut tar_file = File::create(&tar_path)?;
    io::copy(&mut xz_decoder, &mut tar_file).map_err(|e| {
        BunsekiError::Custom(format!("Failed to decompress XZ to TAR: {}. Possible corrupt download.", e))
    })?;

    let mut archive = Archive::new(BufReader::new(File::open(&tar_path)?));
    archive.unpack(&extract_path)?;

    let inner_path = extract_path.join(UNIDIC_FOLDER);
    let zst_path = inner_path.join("system.dic.zst");
    if !zst_path.exists() {
        return Err(BunsekiError::MissingDictionary(zst_path));
    }

    info!("Decompressing system.dic.zst...");
    copy_decode(
        BufReader::new(File::open(&zst_path)?),
        BufWriter::new(File::create(&final_dic_path)?),
    )?;

    for licence in ["BSD", "NOTICE"] {
        let source = inner_path.join(licence);
        if source.exists() {
            fs::rename(&source, extract_path.join(licence))?;
        }
    }

    cleanup_files(&extract_path)?;
    fs::remove_file(&download_path).ok();
    fs::remove_file(&tar_path).ok();

    info!("Tokenizer dictionary ready at {:?}", final_dic_path);
    Ok(final_dic_path)
}

fn cleanup_files(folder_path: &Path) -> Result<(), BunsekiError> {
    for entry in fs::read_dir(folder_path)? {
        let path = entry?.path();
        let keep = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| KEEP_FILES.contains(&name));

        if keep {
            continue;
        }

        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Reads a vibrato dictionary, transparently decompressing `.zst` files.
pub fn load_dictionary(path: &Path) -> Result<Dictionary, BunsekiError> {
    if !path.exists() {
        return Err(BunsekiError::MissingDictionary(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);
    let is_zstd = path.extension().and_then(|ext| ext.to_str()) == Some("zst");

    let dict = if is_zstd {
        Dictionary::read(ZstdDecoder::new(reader)?)?
    } else {
        Dictionary::read(reader)?
    };
    Ok(dict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_dictionary() {
        let mut settings = Settings::default();
        settings.tokenizer.dictionary_path = Some(PathBuf::from("/nonexistent/system.dic"));
        assert!(matches!(
            resolve_dictionary_path(&settings),
            Err(BunsekiError::MissingDictionary(_))
        ));
        assert!(matches!(
            load_dictionary(Path::new("/nonexistent/system.dic")),
            Err(BunsekiError::MissingDictionary(_))
        ));
    }

    #[test]
    fn test_cleanup_keeps_dictionary_and_licences() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["system.dic", "BSD", "NOTICE", "README"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();

        cleanup_files(dir.path()).unwrap();

        assert!(dir.path().join("system.dic").exists());
        assert!(dir.path().join("BSD").exists());
        assert!(!dir.path().join("README").exists());
        assert!(!dir.path().join("nested").exists());
    }
}
