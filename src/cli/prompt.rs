use crate::core::{Field, FieldValue, Kelas, Rencana};
use crate::runtime::{Effect, Intent, LeadSink, NoticeLevel, Reducer, SubmissionStatus};
use crate::state::{FormStore, Step};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Help,
    Quit,
}

/// Parses one line typed at the prompt.
///
/// `field=value` sets a field, `+key` toggles an interest, and the words
/// `lanjut`, `kembali`, `kirim`, `ulang`, `bantuan`, `keluar` (or their
/// English forms) drive navigation.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if let Some(key) = line.strip_prefix('+') {
        return Ok(Command::Intent(Intent::ToggleInterest(key.trim().to_string())));
    }

    if let Some((name, value)) = line.split_once('=') {
        let field: Field = name.parse().map_err(|err| format!("{err}"))?;
        return Ok(Command::Intent(Intent::SetField {
            field,
            value: parse_value(field, value)?,
        }));
    }

    let command = match line.to_ascii_lowercase().as_str() {
        "lanjut" | "next" | ">" => Command::Intent(Intent::Next),
        "kembali" | "back" | "<" => Command::Intent(Intent::Back),
        "kirim" | "submit" => Command::Intent(Intent::Submit),
        "ulang" | "reset" => Command::Intent(Intent::Reset),
        "tutup" | "ok" => Command::Intent(Intent::DismissNotice),
        "bantuan" | "help" | "?" => Command::Help,
        "keluar" | "quit" | "exit" => Command::Quit,
        other => return Err(format!("perintah tidak dikenal: `{other}`")),
    };
    Ok(command)
}

pub fn parse_value(field: Field, raw: &str) -> Result<FieldValue, String> {
    match field {
        Field::IzinFollowUp => parse_flag(raw)
            .map(FieldValue::Bool)
            .ok_or_else(|| format!("`{raw}` bukan ya/tidak")),
        Field::Ketertarikan => Ok(FieldValue::List(
            raw.split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        // Text is kept verbatim, surrounding whitespace included.
        _ => Ok(FieldValue::Text(raw.to_string())),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "ya" | "y" | "yes" | "true" | "1" => Some(true),
        "tidak" | "t" | "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

pub struct Prompt<'a> {
    store: FormStore,
    sink: &'a dyn LeadSink,
}

impl<'a> Prompt<'a> {
    pub fn new(store: FormStore, sink: &'a dyn LeadSink) -> Self {
        Self { store, sink }
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        render(&self.store, out)?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }

            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => write_help(out)?,
                Ok(Command::Intent(intent)) => {
                    match Reducer::reduce(&mut self.store, intent, self.sink) {
                        Ok(effects) => {
                            if effects.contains(&Effect::RequestRender) {
                                render(&self.store, out)?;
                            }
                        }
                        Err(err) => writeln!(out, "! {err}")?,
                    }
                }
                Err(err) => writeln!(out, "! {err}")?,
            }
            write!(out, "> ")?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }
}

pub fn render(store: &FormStore, out: &mut impl Write) -> io::Result<()> {
    let config = store.config();
    writeln!(out)?;

    if let Some(notice) = store.notice() {
        let marker = match notice.level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Failure => "!",
        };
        writeln!(out, "{marker} {}", notice.message)?;
    }

    if store.status() == SubmissionStatus::Succeeded {
        return render_done(store, out);
    }

    let step = store.step();
    writeln!(out, "{}", config.brand.title)?;
    writeln!(
        out,
        "Langkah {} dari {}: {} ({}%)",
        step.index(),
        Step::COUNT,
        step.title(),
        store.progress_percent()
    )?;

    let form = store.form();
    for field in step.fields() {
        let value = match field {
            Field::Nama => form.nama.clone(),
            Field::Sekolah if store.sekolah_locked() => format!("{} (dari QR)", form.sekolah),
            Field::Sekolah => form.sekolah.clone(),
            Field::Kelas => format!("{} [{}]", form.kelas, choices(Kelas::ALL.map(Kelas::as_str))),
            Field::Wa => form.wa.clone(),
            Field::MinatBidang => form.minat_bidang.clone(),
            Field::Rencana => format!(
                "{} [{}]",
                form.rencana,
                choices(Rencana::ALL.map(Rencana::as_str))
            ),
            Field::Ketertarikan => form
                .ketertarikan
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            Field::IzinFollowUp => yes_no(form.izin_follow_up).to_string(),
        };
        writeln!(out, "  {:<22} {}={}", field.label(), field, value)?;
        if let Some(error) = store.errors().get(*field) {
            writeln!(out, "    ! {error}")?;
        }

        match field {
            Field::MinatBidang => {
                for faculty in &config.options.minat_bidang {
                    let mark = if faculty.key == form.minat_bidang { "*" } else { " " };
                    writeln!(out, "    {mark} {:<12} {}", faculty.key, faculty.title)?;
                }
            }
            Field::Ketertarikan => {
                for interest in &config.options.ketertarikan {
                    let mark = if form.ketertarikan.contains(&interest.key) { "*" } else { " " };
                    writeln!(out, "    {mark} +{:<11} {}", interest.key, interest.label)?;
                }
            }
            _ => {}
        }
    }

    let action = if step.is_last() { "kirim" } else { "lanjut" };
    writeln!(out, "({action} | kembali | bantuan | keluar)")
}

fn render_done(store: &FormStore, out: &mut impl Write) -> io::Result<()> {
    let summary = store.summary();
    writeln!(out, "Terima kasih! Data kamu sudah tercatat.")?;
    writeln!(out, "  Nama     {}", summary.nama)?;
    writeln!(out, "  Minat    {}", summary.minat)?;
    writeln!(out, "  Sekolah  {}", summary.sekolah)?;
    writeln!(out, "  Kelas    {}", summary.kelas)?;
    if let Some(number) = &store.config().brand.admin_whatsapp {
        writeln!(out, "Konsultasi: https://wa.me/{number}")?;
    }
    writeln!(out, "(ulang: isi untuk teman lain | keluar)")
}

fn write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "  field=nilai   isi field, misal nama=Aulia atau izinFollowUp=ya")?;
    writeln!(out, "  +kunci        pilih/batal pilih ketertarikan, misal +beasiswa")?;
    writeln!(out, "  lanjut        ke langkah berikutnya")?;
    writeln!(out, "  kembali       ke langkah sebelumnya")?;
    writeln!(out, "  kirim         kirim data")?;
    writeln!(out, "  ulang         isi untuk teman lain")?;
    writeln!(out, "  keluar        selesai")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "ya" } else { "tidak" }
}

fn choices<const N: usize>(items: [&str; N]) -> String {
    items.join("/")
}

#[cfg(test)]
mod tests {
    use super::{Command, Prompt, parse_command};
    use crate::config::FormConfig;
    use crate::core::{Field, FieldValue};
    use crate::error::SubmitError;
    use crate::runtime::{Intent, LeadPayload, SubmissionStatus, SubmitReceipt};
    use crate::state::FormStore;
    use std::io::Cursor;
    use std::sync::Arc;

    fn accept(_: &LeadPayload) -> Result<SubmitReceipt, SubmitError> {
        Ok(SubmitReceipt::default())
    }

    #[test]
    fn parses_assignments_toggles_and_words() {
        assert_eq!(
            parse_command("nama= Aulia"),
            Ok(Command::Intent(Intent::set(Field::Nama, " Aulia")))
        );
        assert_eq!(
            parse_command("izinFollowUp=tidak"),
            Ok(Command::Intent(Intent::set(Field::IzinFollowUp, false)))
        );
        assert_eq!(
            parse_command("ketertarikan=pmdk, usm"),
            Ok(Command::Intent(Intent::SetField {
                field: Field::Ketertarikan,
                value: FieldValue::List(vec!["pmdk".into(), "usm".into()]),
            }))
        );
        assert_eq!(
            parse_command("+beasiswa"),
            Ok(Command::Intent(Intent::ToggleInterest("beasiswa".into())))
        );
        assert_eq!(parse_command("LANJUT"), Ok(Command::Intent(Intent::Next)));
        assert_eq!(parse_command("keluar"), Ok(Command::Quit));
        assert!(parse_command("alamat=Bandung").is_err());
        assert!(parse_command("izinFollowUp=mungkin").is_err());
        assert!(parse_command("terbang").is_err());
    }

    #[test]
    fn scripted_session_submits_a_lead() {
        let config = Arc::new(FormConfig::default());
        let store = FormStore::from_query(config, "school=SMA+Pasundan+1");
        let mut prompt = Prompt::new(store, &accept);

        let script = "nama=Aulia\nwa=081234567890\nlanjut\nminatBidang=FK\nlanjut\n+konsultasi\nkirim\nkeluar\n";
        let mut out = Vec::new();
        prompt.run(Cursor::new(script), &mut out).expect("session runs");

        let transcript = String::from_utf8(out).expect("utf8");
        assert!(transcript.contains("Langkah 1 dari 3"));
        assert!(transcript.contains("SMA Pasundan 1 (dari QR)"));
        assert!(transcript.contains("Fakultas Kedokteran"));
        assert!(transcript.contains("Terima kasih!"));
        assert_eq!(prompt.store().status(), SubmissionStatus::Succeeded);
    }

    #[test]
    fn errors_are_shown_inline() {
        let store = FormStore::from_query(Arc::new(FormConfig::default()), "");
        let mut prompt = Prompt::new(store, &accept);

        let mut out = Vec::new();
        prompt
            .run(Cursor::new("lanjut\n+gratis\nnama=Aulia\nulang\n"), &mut out)
            .expect("session runs");

        let transcript = String::from_utf8(out).expect("utf8");
        assert!(transcript.contains("! Nama wajib diisi."));
        assert!(transcript.contains("! unknown interest key `gratis`"));
        assert!(transcript.contains("! nothing to reset"));
        assert_eq!(prompt.store().form().nama, "Aulia");
    }
}
