use anyhow::Context;
use std::path::Path;
use vtdd_core::{config::Config, io, paths};

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing vtdd in: {}", root.display());

    // 1. Config
    let config_path = paths::config_path(root);
    let config = if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
        Config::load(root).context("failed to load existing config")?
    } else {
        let cfg = Config::default();
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
        cfg
    };

    // 2. Components directory
    let components = root.join(&config.components_dir);
    std::fs::create_dir_all(&components)
        .with_context(|| format!("failed to create {}", components.display()))?;

    // 3. Test-runner glue, never overwritten
    let vitest = vitest_config(config.coverage.threshold);
    let files: [(&str, &str); 3] = [
        (paths::VITEST_CONFIG, vitest.as_str()),
        (paths::TEST_SETUP, TEST_SETUP_CONTENT),
        (paths::TEST_HELPERS, TEST_HELPERS_CONTENT),
    ];
    for (rel, content) in files {
        let path = root.join(rel);
        let written = io::write_if_missing(&path, content.as_bytes())
            .with_context(|| format!("failed to write {rel}"))?;
        if written {
            println!("  created: {rel}");
        } else {
            println!("  exists:  {rel}");
        }
    }

    println!("\nNext: vtdd issue   (or: vtdd scaffold <Name> --criterion \"Given ..., when ..., then ...\")");
    Ok(())
}

fn vitest_config(threshold: u32) -> String {
    VITEST_CONFIG_TEMPLATE.replace("{{THRESHOLD}}", &threshold.to_string())
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

const VITEST_CONFIG_TEMPLATE: &str = r#"import { defineConfig } from 'vitest/config'
import vue from '@vitejs/plugin-vue'

export default defineConfig({
  plugins: [vue()],
  test: {
    environment: 'jsdom',
    globals: true,
    setupFiles: ['./src/test/setup.js'],
    include: ['src/**/*.{test,spec}.{js,ts}'],
    coverage: {
      provider: 'v8',
      reporter: ['text', 'html', 'lcov'],
      include: ['src/**/*.{js,ts,vue}'],
      exclude: ['src/**/*.{test,spec}.{js,ts}', 'src/test/**'],
      thresholds: {
        statements: {{THRESHOLD}},
        branches: {{THRESHOLD}},
        functions: {{THRESHOLD}},
        lines: {{THRESHOLD}},
      },
    },
  },
})
"#;

const TEST_SETUP_CONTENT: &str = r#"import { beforeAll, afterAll, afterEach, vi } from 'vitest'
import { config } from '@vue/test-utils'

class ObserverStub {
  observe() {}
  unobserve() {}
  disconnect() {}
  takeRecords() {
    return []
  }
}

function storageStub() {
  let store = {}
  return {
    getItem: (key) => (key in store ? store[key] : null),
    setItem: (key, value) => {
      store[key] = String(value)
    },
    removeItem: (key) => {
      delete store[key]
    },
    clear: () => {
      store = {}
    },
    key: (i) => Object.keys(store)[i] ?? null,
    get length() {
      return Object.keys(store).length
    },
  }
}

beforeAll(() => {
  vi.stubGlobal('IntersectionObserver', ObserverStub)
  vi.stubGlobal('ResizeObserver', ObserverStub)
  vi.stubGlobal('localStorage', storageStub())
  vi.stubGlobal('sessionStorage', storageStub())
  vi.stubGlobal('requestAnimationFrame', (cb) => setTimeout(() => cb(Date.now()), 0))
  vi.stubGlobal('cancelAnimationFrame', (id) => clearTimeout(id))
  vi.stubGlobal('matchMedia', (query) => ({
    matches: false,
    media: query,
    onchange: null,
    addEventListener: vi.fn(),
    removeEventListener: vi.fn(),
    dispatchEvent: vi.fn(),
  }))
  config.global.stubs = { teleport: true }
})

afterEach(() => {
  localStorage.clear()
  sessionStorage.clear()
  vi.clearAllMocks()
})

afterAll(() => {
  vi.unstubAllGlobals()
})
"#;

const TEST_HELPERS_CONTENT: &str = r#"import { mount, shallowMount } from '@vue/test-utils'
import { render } from '@testing-library/vue'

export function mountComponent(component, options = {}) {
  return mount(component, { attachTo: document.body, ...options })
}

export function shallowMountComponent(component, options = {}) {
  return shallowMount(component, options)
}

export function renderComponent(component, options = {}) {
  return render(component, options)
}

const INTERACTIVE = 'button, a[href], input, select, textarea, [tabindex]'

// Returns a list of problems; empty means every interactive element is labelled.
export function checkA11yAttributes(wrapper) {
  const problems = []
  for (const el of wrapper.element.querySelectorAll(INTERACTIVE)) {
    const label =
      el.getAttribute('aria-label') ||
      el.getAttribute('aria-labelledby') ||
      el.getAttribute('title') ||
      el.textContent.trim() ||
      (el.id && document.querySelector(`label[for="${el.id}"]`))
    if (!label) {
      problems.push(`<${el.tagName.toLowerCase()}> has no accessible name`)
    }
  }
  for (const img of wrapper.element.querySelectorAll('img')) {
    if (!img.hasAttribute('alt')) {
      problems.push('<img> is missing alt text')
    }
  }
  return problems
}

export async function pressKey(wrapper, key) {
  await wrapper.trigger('keydown', { key })
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vitest_config_applies_threshold_everywhere() {
        let text = vitest_config(85);
        assert_eq!(text.matches(": 85,").count(), 4);
        assert!(!text.contains("{{THRESHOLD}}"));
    }
}
