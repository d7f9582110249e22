use anyhow::{bail, Context, Result};
use blockdct::{CompressionConfig, GridCompressor, PixelGrid, TransformBackend};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use image::codecs::jpeg::JpegEncoder;
use image::GrayImage;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

/// JPEG 출력 품질. 블록 DCT 손실 외의 추가 손실을 막기 위해 최대값 사용
const JPEG_QUALITY: u8 = 100;

fn cli() -> Command {
    Command::new("blockdct")
        .version("0.1.0")
        .about("블록 DCT 기반 흑백 이미지 손실 압축")
        .arg(
            Arg::new("input")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("입력 이미지 (흑백으로 변환됨)")
        )
        .arg(
            Arg::new("output")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("출력 이미지 경로 (확장자로 포맷 결정, 예: out.jpg)")
        )
        .arg(
            Arg::new("block-size")
                .long("block-size")
                .short('f')
                .value_name("F")
                .value_parser(value_parser!(usize))
                .help("블록 크기 F")
        )
        .arg(
            Arg::new("cutoff")
                .long("cutoff")
                .short('d')
                .value_name("D")
                .value_parser(value_parser!(usize))
                .help("대각 컷오프 d (0..=2F-2)")
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("JSON 설정 파일 (명령행 옵션이 우선)")
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .value_name("BACKEND")
                .value_parser(["matrix", "fast"])
                .help("변환 백엔드: matrix (O(N³), 기본) 또는 fast (rustdct)")
        )
        .arg(
            Arg::new("sequential")
                .long("sequential")
                .action(ArgAction::SetTrue)
                .help("블록 병렬 처리 끄기")
        )
        .arg(
            Arg::new("report")
                .long("report")
                .action(ArgAction::SetTrue)
                .help("MSE/PSNR 보고서 출력")
        )
}

fn resolve_config(matches: &ArgMatches) -> Result<CompressionConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => CompressionConfig::from_json_file(path)?,
        None => CompressionConfig::default(),
    };

    if let Some(&block_size) = matches.get_one::<usize>("block-size") {
        config.block_size = block_size;
    }
    if let Some(&cutoff) = matches.get_one::<usize>("cutoff") {
        config.cutoff = cutoff;
    }
    if let Some(backend) = matches.get_one::<String>("backend") {
        config.backend = backend.parse::<TransformBackend>().map_err(anyhow::Error::msg)?;
    }
    if matches.get_flag("sequential") {
        config.parallel = false;
    }

    Ok(config)
}

fn is_jpeg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}

/// 압축된 그리드를 저장. JPEG는 품질 100으로 인코딩하고 나머지는 확장자 포맷
fn save_grid(grid: PixelGrid, path: &Path) -> Result<()> {
    let (width, height) = (grid.width() as u32, grid.height() as u32);
    let image = GrayImage::from_raw(width, height, grid.into_raw())
        .context("compressed buffer does not match its dimensions")?;

    if is_jpeg_path(path) {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY)
            .encode_image(&image)
            .with_context(|| format!("failed to encode {}", path.display()))?;
    } else {
        image
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

/// 바이트 수를 B / kB / MB 문자열로
fn format_bytes(bytes: u64) -> String {
    let value = bytes as f64;
    if value > 1e6 {
        format!("{:.2} MB", value / 1e6)
    } else if value > 1e3 {
        format!("{:.2} kB", value / 1e3)
    } else {
        format!("{} B", bytes)
    }
}

fn file_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len())
}

fn run() -> Result<()> {
    let matches = cli().get_matches();
    let config = resolve_config(&matches)?;
    let compressor = GridCompressor::new(&config).context("invalid compression parameters")?;

    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing input path")?;
    let output = matches
        .get_one::<PathBuf>("output")
        .context("missing output path")?;

    let image = image::open(input)
        .with_context(|| format!("failed to open {}", input.display()))?
        .to_luma8();
    let (width, height) = image.dimensions();
    let grid = PixelGrid::from_raw(width as usize, height as usize, image.into_raw())?;
    log::info!("입력: {} ({}x{})", input.display(), width, height);

    let report_requested = matches.get_flag("report");
    let start = Instant::now();
    let compressed = if report_requested {
        let (compressed, report) = compressor.compress_with_report(&grid)?;
        report.print_report();
        compressed
    } else {
        compressor.compress(&grid)?
    };
    log::info!(
        "압축 완료: {:.2} ms (F = {}, d = {}, {:?})",
        start.elapsed().as_secs_f64() * 1000.0,
        config.block_size,
        config.cutoff,
        config.backend
    );

    if compressed.is_empty() {
        bail!(
            "image {}x{} is smaller than one {}x{} block",
            width,
            height,
            config.block_size,
            config.block_size
        );
    }

    let (out_w, out_h) = (compressed.width(), compressed.height());
    save_grid(compressed, output)?;
    log::info!("출력: {} ({}x{})", output.display(), out_w, out_h);

    if report_requested {
        println!("입력 파일 크기: {}", format_bytes(file_size(input)?));
        println!("출력 파일 크기: {}", format_bytes(file_size(output)?));
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("오류: {:#}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdct::compress;
    use blockdct::core::matrix::mean_squared_error;

    fn matches_from(args: &[&str]) -> ArgMatches {
        cli().try_get_matches_from(args.iter().copied()).unwrap()
    }

    fn write_config(dir: &Path) -> PathBuf {
        let path = dir.join("config.json");
        fs::write(
            &path,
            r#"{"block_size": 4, "cutoff": 5, "backend": "fast", "parallel": true}"#,
        )
        .unwrap();
        path
    }

    fn smooth_grid(width: usize, height: usize) -> PixelGrid {
        let data = (0..height)
            .flat_map(|r| (0..width).map(move |c| (40 + 2 * r + 3 * c) as u8))
            .collect();
        PixelGrid::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn 설정_파일_값_유지_테스트() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path());
        let config_arg = config_path.to_str().unwrap();

        let matches = matches_from(&["blockdct", "in.png", "out.png", "-c", config_arg]);
        let config = resolve_config(&matches).unwrap();

        assert_eq!(config.block_size, 4);
        assert_eq!(config.cutoff, 5);
        assert_eq!(config.backend, TransformBackend::Fast);
        assert!(config.parallel);
        println!("✅ 설정 파일 값 유지 테스트 통과");
    }

    #[test]
    fn 명령행_옵션_우선_테스트() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path());
        let config_arg = config_path.to_str().unwrap();

        let matches = matches_from(&[
            "blockdct", "in.png", "out.png", "-c", config_arg,
            "-f", "16", "-d", "20", "--backend", "matrix", "--sequential",
        ]);
        let config = resolve_config(&matches).unwrap();

        assert_eq!(config.block_size, 16);
        assert_eq!(config.cutoff, 20);
        assert_eq!(config.backend, TransformBackend::Matrix);
        assert!(!config.parallel);

        // 일부 옵션만 주면 나머지는 파일 값
        let matches = matches_from(&["blockdct", "in.png", "out.png", "-c", config_arg, "-d", "2"]);
        let config = resolve_config(&matches).unwrap();
        assert_eq!((config.block_size, config.cutoff), (4, 2));
        assert_eq!(config.backend, TransformBackend::Fast);
        println!("✅ 명령행 옵션 우선 테스트 통과");
    }

    #[test]
    fn 설정_파일_없는_기본값_테스트() {
        let matches = matches_from(&["blockdct", "in.png", "out.png"]);
        assert_eq!(resolve_config(&matches).unwrap(), CompressionConfig::default());

        assert!(cli()
            .try_get_matches_from(["blockdct", "in.png", "out.png", "--backend", "wavelet"])
            .is_err());
    }

    #[test]
    fn jpeg_최대_품질_저장_테스트() {
        let dir = tempfile::tempdir().unwrap();
        let grid = smooth_grid(64, 64);
        let compressed = compress(&grid, 8, 14).unwrap();

        for name in ["out.jpg", "out.JPEG"] {
            let path = dir.path().join(name);
            assert!(is_jpeg_path(&path));
            save_grid(compressed.clone(), &path).unwrap();

            let reloaded = image::open(&path).unwrap().to_luma8();
            let (w, h) = reloaded.dimensions();
            let reloaded = PixelGrid::from_raw(w as usize, h as usize, reloaded.into_raw()).unwrap();
            let mse = mean_squared_error(&compressed, &reloaded).unwrap();
            println!("{} 재인코딩 MSE: {:.4}", name, mse);
            assert!(mse < 2.0, "{} 재인코딩 손실이 너무 큼: {}", name, mse);
        }

        // 무손실 포맷은 그대로 복원
        let path = dir.path().join("out.png");
        assert!(!is_jpeg_path(&path));
        save_grid(compressed.clone(), &path).unwrap();
        let reloaded = image::open(&path).unwrap().to_luma8();
        assert_eq!(reloaded.into_raw(), compressed.into_raw());
    }

    #[test]
    fn 바이트_크기_문자열_테스트() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1000), "1000 B");
        assert_eq!(format_bytes(2048), "2.05 kB");
        assert_eq!(format_bytes(3_500_000), "3.50 MB");
    }
}
